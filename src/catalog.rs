use serde::{Deserialize, Serialize};

use crate::occupancy::Occupancy;

/// immutable room reference data, seeded once by migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// display code, e.g. "05"
    pub room_no: String,
    /// canonical identifier, e.g. "201"
    pub room_id: String,

    // utility account identifiers
    pub key_number: Option<String>,
    pub electricity_service_no: Option<String>,
    pub electricity_account_no: Option<String>,
}

impl Room {
    pub fn new(room_no: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            room_no: room_no.into(),
            room_id: room_id.into(),
            key_number: None,
            electricity_service_no: None,
            electricity_account_no: None,
        }
    }
}

/// the property's room catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyCatalog {
    rooms: Vec<Room>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// one-time seed of the room list
    pub fn seed(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn find(&self, room_id: &str) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|room| room.room_id.trim() == room_id.trim())
    }
}

/// resolve the occupancy bound to a room, matching either identifier scheme
///
/// historical data mixes room_id and room_no; the first record whose trimmed
/// room_id or room_no equals the target wins, ambiguity is not an error
pub fn find_occupancy<'a>(occupancies: &'a [Occupancy], target: &str) -> Option<&'a Occupancy> {
    let target = target.trim();
    occupancies
        .iter()
        .find(|occupancy| occupancy.room_id.trim() == target || occupancy.room_no.trim() == target)
}

/// true iff the occupancy's status is exactly Occupied
pub fn is_occupied(occupancy: &Occupancy) -> bool {
    occupancy.is_occupied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use crate::types::OccupancyStatus;

    fn occupancies() -> Vec<Occupancy> {
        vec![
            Occupancy::new("201", "05", "First", Money::from_major(5000)),
            Occupancy::new("202", "06", "Second", Money::from_major(5200)),
        ]
    }

    #[test]
    fn test_find_by_room_id() {
        let all = occupancies();
        let found = find_occupancy(&all, "202").unwrap();
        assert_eq!(found.tenant, "Second");
    }

    #[test]
    fn test_find_by_room_no() {
        let all = occupancies();
        let found = find_occupancy(&all, "05").unwrap();
        assert_eq!(found.tenant, "First");
    }

    #[test]
    fn test_find_trims_whitespace() {
        let mut all = occupancies();
        all[0].room_id = " 201 ".to_string();

        assert!(find_occupancy(&all, "201").is_some());
        assert!(find_occupancy(&all, " 201").is_some());
    }

    #[test]
    fn test_find_first_match_wins() {
        let mut all = occupancies();
        all[1].room_id = "201".to_string();

        let found = find_occupancy(&all, "201").unwrap();
        assert_eq!(found.tenant, "First");
    }

    #[test]
    fn test_find_none() {
        let all = occupancies();
        assert!(find_occupancy(&all, "999").is_none());
    }

    #[test]
    fn test_is_occupied_exact() {
        let mut occupancy = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));
        assert!(is_occupied(&occupancy));

        occupancy.status = OccupancyStatus::Vacant;
        assert!(!is_occupied(&occupancy));

        occupancy.status = OccupancyStatus::Maintenance;
        assert!(!is_occupied(&occupancy));
    }

    #[test]
    fn test_catalog_find() {
        let catalog = PropertyCatalog::seed(vec![Room::new("05", "201"), Room::new("06", "202")]);

        assert_eq!(catalog.find("202").unwrap().room_no, "06");
        assert!(catalog.find("203").is_none());
    }
}
