use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::calendar::{Month, MonthKey};
use crate::config::BillingConfig;
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::occupancy::Occupancy;
use crate::storage::{OccupancyField, OccupancyPatch};
use crate::types::PaymentStatus;
use crate::water::{WaterBill, WaterBillingEngine};

/// advance one step through the fixed payment-status cycle
///
/// None -> Pending -> Rent Only -> Paid -> None
pub fn next_status(current: Option<PaymentStatus>) -> Option<PaymentStatus> {
    match current {
        None => Some(PaymentStatus::Pending),
        Some(PaymentStatus::Pending) => Some(PaymentStatus::RentOnly),
        Some(PaymentStatus::RentOnly) => Some(PaymentStatus::Paid),
        Some(PaymentStatus::Paid) => None,
    }
}

/// result of a successful status advance: the candidate write plus the
/// facts it was computed from
#[derive(Debug, Clone)]
pub struct StatusAdvance {
    pub month: MonthKey,
    pub old_status: Option<PaymentStatus>,
    pub new_status: Option<PaymentStatus>,
    /// water bill consulted for a Paid transition
    pub water: Option<WaterBill>,
    /// committed charge, present only when the new status is Paid
    pub total: Option<Money>,
    /// atomic history+total update for the storage collaborator
    pub patch: OccupancyPatch,
}

/// payment-status state machine with the billing-commit gate
///
/// computes guard and candidate write synchronously from a snapshot; the
/// caller applies the patch and hands it to storage
pub struct StatusEngine<'a> {
    config: &'a BillingConfig,
}

impl<'a> StatusEngine<'a> {
    pub fn new(config: &'a BillingConfig) -> Self {
        Self { config }
    }

    /// advance the room's status for the month, refusing the transition when
    /// the room is not occupied, the month is in the future, or a Paid
    /// transition lacks a valid non-negative water bill
    pub fn advance(
        &self,
        occupancy: &Occupancy,
        month: Month,
        time_provider: &SafeTimeProvider,
    ) -> Result<StatusAdvance> {
        if !occupancy.is_occupied() {
            return Err(BillingError::RoomNotOccupied {
                status: occupancy.status,
            });
        }

        let key = month.key();
        if month.is_future(time_provider) {
            return Err(BillingError::FutureMonth { key });
        }

        let old_status = occupancy.ledger.status(&key);
        let new_status = next_status(old_status);

        let mut water = None;
        let mut total = None;

        if new_status == Some(PaymentStatus::Paid) {
            let rate = self.config.effective_water_rate(occupancy);
            let engine = WaterBillingEngine::from_config(self.config);
            let bill = engine.compute(&occupancy.ledger, month, rate);

            let Some(amount) = bill.amount else {
                return Err(BillingError::WaterReadingMissing { key });
            };
            if bill.units.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
                return Err(BillingError::NegativeConsumption {
                    key,
                    units: bill.units.unwrap_or(Decimal::ZERO),
                });
            }

            total = Some((occupancy.rent + amount + self.config.utility_surcharge).round_whole());
            water = Some(bill);
        }

        // history and total always travel together in one atomic update;
        // non-Paid states clear the total
        let patch = OccupancyPatch::new(occupancy.id)
            .with(OccupancyField::PaymentStatus {
                key: key.clone(),
                value: new_status,
            })
            .with(OccupancyField::PaymentTotal {
                key: key.clone(),
                value: total,
            });

        Ok(StatusAdvance {
            month: key,
            old_status,
            new_status,
            water,
            total,
            patch,
        })
    }
}
