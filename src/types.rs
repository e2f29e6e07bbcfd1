use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for an occupancy document
pub type OccupancyId = Uuid;

/// unique identifier for an expense document
pub type ExpenseId = Uuid;

/// occupancy status
///
/// only Occupied gates billing mutation; the check is exact and case-sensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupancyStatus {
    Occupied,
    Vacant,
    Maintenance,
}

impl OccupancyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OccupancyStatus::Occupied => "Occupied",
            OccupancyStatus::Vacant => "Vacant",
            OccupancyStatus::Maintenance => "Maintenance",
        }
    }
}

/// recorded rent-payment status for one month
///
/// absence from the payment history map is the fourth, unmarked state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    #[serde(rename = "Rent Only")]
    RentOnly,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::RentOnly => "Rent Only",
            PaymentStatus::Paid => "Paid",
        }
    }
}

/// expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Electricity,
    Water,
    Plumbing,
    Repairs,
    Cleaning,
    Salary,
    Maintenance,
    Other,
}
