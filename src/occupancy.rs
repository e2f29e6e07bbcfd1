use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::calendar::MonthKey;
use crate::decimal::{Money, Rate};
use crate::types::{OccupancyId, OccupancyStatus, PaymentStatus};

/// month-keyed billing facts for one tenancy
///
/// payment_totals holds an entry for a month if and only if payment_history
/// marks that month Paid; the state machine is the only writer of totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingLedger {
    #[serde(default)]
    pub payment_history: BTreeMap<MonthKey, PaymentStatus>,
    #[serde(default)]
    pub payment_totals: BTreeMap<MonthKey, Money>,
    #[serde(default)]
    pub water_readings: BTreeMap<MonthKey, Decimal>,
    #[serde(default)]
    pub water_meter_reset: BTreeMap<MonthKey, bool>,
}

impl BillingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// recorded payment status for the month, if any
    pub fn status(&self, key: &MonthKey) -> Option<PaymentStatus> {
        self.payment_history.get(key).copied()
    }

    /// committed charge for the month, present only for Paid months
    pub fn total(&self, key: &MonthKey) -> Option<Money> {
        self.payment_totals.get(key).copied()
    }

    /// raw meter reading for the month, if recorded
    pub fn reading(&self, key: &MonthKey) -> Option<Decimal> {
        self.water_readings.get(key).copied()
    }

    /// whether the month's reading is flagged as a meter replacement
    pub fn meter_reset(&self, key: &MonthKey) -> bool {
        self.water_meter_reset.get(key).copied().unwrap_or(false)
    }

    /// check the paid/total invariant over every recorded month
    pub fn totals_consistent(&self) -> bool {
        let all_totals_paid = self
            .payment_totals
            .keys()
            .all(|key| self.status(key) == Some(PaymentStatus::Paid));
        let all_paid_totaled = self
            .payment_history
            .iter()
            .filter(|(_, status)| **status == PaymentStatus::Paid)
            .all(|(key, _)| self.payment_totals.contains_key(key));

        all_totals_paid && all_paid_totaled
    }
}

/// mutable tenancy/billing record bound to a room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    // identification
    pub id: OccupancyId,
    pub room_id: String,
    pub room_no: String,

    // status
    pub status: OccupancyStatus,

    // tenant descriptives, not load-bearing for calculations
    pub tenant: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub join_date: Option<NaiveDate>,

    // financial terms
    pub rent: Money,
    pub advance: Money,
    /// per-unit tariff override; room-class default applies when absent
    pub water_rate: Option<Rate>,

    // month-keyed billing facts
    #[serde(flatten)]
    pub ledger: BillingLedger,

    pub eviction_confirmed: bool,

    /// frozen snapshot of the previous occupant, consulted only as
    /// historical fallback for months predating the current tenancy
    pub archived_tenant: Option<ArchivedTenant>,
}

impl Occupancy {
    /// create an occupied tenancy record with an empty ledger
    pub fn new(room_id: impl Into<String>, room_no: impl Into<String>, tenant: impl Into<String>, rent: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id: room_id.into(),
            room_no: room_no.into(),
            status: OccupancyStatus::Occupied,
            tenant: tenant.into(),
            phone: None,
            email: None,
            join_date: None,
            rent,
            advance: Money::ZERO,
            water_rate: None,
            ledger: BillingLedger::new(),
            eviction_confirmed: false,
            archived_tenant: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.status == OccupancyStatus::Occupied
    }
}

/// frozen billing snapshot of a room's previous occupant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivedTenant {
    pub tenant: String,
    pub rent: Money,
    pub moved_out: Option<NaiveDate>,
    #[serde(flatten)]
    pub ledger: BillingLedger,
}

/// which record supplies a month's billing facts
///
/// resolved once per (room, month); consumed uniformly by the aggregator
#[derive(Debug, Clone, Copy)]
pub enum BillingSource<'a> {
    Current(&'a Occupancy),
    Archived(&'a ArchivedTenant),
}

/// select the record that holds billing facts for the month: the current
/// occupancy if it has any entry, else an archived snapshot that does
pub fn billing_source_for<'a>(occupancy: &'a Occupancy, key: &MonthKey) -> BillingSource<'a> {
    if occupancy.ledger.status(key).is_some() {
        return BillingSource::Current(occupancy);
    }
    if let Some(archived) = &occupancy.archived_tenant {
        if archived.ledger.status(key).is_some() {
            return BillingSource::Archived(archived);
        }
    }
    BillingSource::Current(occupancy)
}

impl BillingSource<'_> {
    fn ledger(&self) -> &BillingLedger {
        match self {
            BillingSource::Current(occupancy) => &occupancy.ledger,
            BillingSource::Archived(archived) => &archived.ledger,
        }
    }

    /// recorded payment status for the month
    pub fn status(&self, key: &MonthKey) -> Option<PaymentStatus> {
        self.ledger().status(key)
    }

    /// monthly base rent of the supplying record
    pub fn rent(&self) -> Money {
        match self {
            BillingSource::Current(occupancy) => occupancy.rent,
            BillingSource::Archived(archived) => archived.rent,
        }
    }

    /// committed charge for a Paid month
    ///
    /// archived snapshots fall back to their base rent when the stored total
    /// is missing; a current record with no total yields None, which the
    /// aggregator coerces leniently
    pub fn settled_amount(&self, key: &MonthKey) -> Option<Money> {
        match self {
            BillingSource::Current(occupancy) => occupancy.ledger.total(key),
            BillingSource::Archived(archived) => {
                archived.ledger.total(key).or(Some(archived.rent))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;

    fn march() -> MonthKey {
        Month::new(2024, 2).unwrap().key()
    }

    fn archived_with_paid(total: Option<Money>) -> ArchivedTenant {
        let mut ledger = BillingLedger::new();
        ledger.payment_history.insert(march(), PaymentStatus::Paid);
        if let Some(total) = total {
            ledger.payment_totals.insert(march(), total);
        }
        ArchivedTenant {
            tenant: "Previous Tenant".to_string(),
            rent: Money::from_major(4800),
            moved_out: None,
            ledger,
        }
    }

    #[test]
    fn test_totals_consistent() {
        let mut ledger = BillingLedger::new();
        assert!(ledger.totals_consistent());

        ledger.payment_history.insert(march(), PaymentStatus::Paid);
        assert!(!ledger.totals_consistent()); // paid without total

        ledger.payment_totals.insert(march(), Money::from_major(5400));
        assert!(ledger.totals_consistent());

        ledger.payment_history.insert(march(), PaymentStatus::Pending);
        assert!(!ledger.totals_consistent()); // total without paid
    }

    #[test]
    fn test_source_prefers_current_entry() {
        let mut occupancy = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));
        occupancy.ledger.payment_history.insert(march(), PaymentStatus::Pending);
        occupancy.archived_tenant = Some(archived_with_paid(Some(Money::from_major(5400))));

        let source = billing_source_for(&occupancy, &march());
        assert_eq!(source.status(&march()), Some(PaymentStatus::Pending));
        assert_eq!(source.rent(), Money::from_major(5000));
    }

    #[test]
    fn test_source_falls_back_to_archive() {
        let mut occupancy = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));
        occupancy.archived_tenant = Some(archived_with_paid(Some(Money::from_major(5400))));

        let source = billing_source_for(&occupancy, &march());
        assert_eq!(source.status(&march()), Some(PaymentStatus::Paid));
        assert_eq!(source.settled_amount(&march()), Some(Money::from_major(5400)));
        assert_eq!(source.rent(), Money::from_major(4800));
    }

    #[test]
    fn test_archived_settled_amount_falls_back_to_rent() {
        let mut occupancy = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));
        occupancy.archived_tenant = Some(archived_with_paid(None));

        let source = billing_source_for(&occupancy, &march());
        assert_eq!(source.settled_amount(&march()), Some(Money::from_major(4800)));
    }
}
