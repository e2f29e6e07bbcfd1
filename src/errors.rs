use rust_decimal::Decimal;
use thiserror::Error;

use crate::calendar::MonthKey;
use crate::decimal::Money;
use crate::types::{ExpenseId, OccupancyId, OccupancyStatus};

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("room not occupied: current status is {status:?}")]
    RoomNotOccupied {
        status: OccupancyStatus,
    },

    #[error("month {key} is in the future and cannot be edited")]
    FutureMonth {
        key: MonthKey,
    },

    #[error("water reading missing or incomplete for {key}: cannot commit payment")]
    WaterReadingMissing {
        key: MonthKey,
    },

    #[error("negative water consumption for {key}: {units} units")]
    NegativeConsumption {
        key: MonthKey,
        units: Decimal,
    },

    #[error("meter reading cannot be negative: {value}")]
    NegativeReading {
        value: Decimal,
    },

    #[error("invalid month index: {index}")]
    InvalidMonthIndex {
        index: u32,
    },

    #[error("expense amount must be positive: {amount}")]
    InvalidExpenseAmount {
        amount: Money,
    },

    #[error("expense not found: {id}")]
    ExpenseNotFound {
        id: ExpenseId,
    },

    #[error("occupancy not found: {id}")]
    OccupancyNotFound {
        id: OccupancyId,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, BillingError>;
