use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;

use crate::calendar::Month;
use crate::config::BillingConfig;
use crate::errors::{BillingError, Result};
use crate::events::{Event, EventStore};
use crate::occupancy::Occupancy;
use crate::payments::{StatusAdvance, StatusEngine};
use crate::storage::{OccupancyField, OccupancyPatch};
use crate::types::{OccupancyId, OccupancyStatus, PaymentStatus};
use crate::water::{WaterBill, WaterBillingEngine};

/// one room's tenancy with its billing configuration and event stream
///
/// mutations update the in-memory record and return the atomic patch the
/// caller hands to the storage collaborator
pub struct Tenancy {
    pub id: OccupancyId,
    pub config: BillingConfig,
    pub record: Occupancy,
    pub events: EventStore,
}

impl Tenancy {
    pub fn new(config: BillingConfig, record: Occupancy) -> Self {
        Self {
            id: record.id,
            config,
            record,
            events: EventStore::new(),
        }
    }

    /// advance the month's payment status through the cycle
    pub fn advance_payment_status(
        &mut self,
        month: Month,
        time_provider: &SafeTimeProvider,
    ) -> Result<StatusAdvance> {
        let engine = StatusEngine::new(&self.config);
        let advance = engine.advance(&self.record, month, time_provider)?;

        let discarded_total = self.record.ledger.total(&advance.month);
        advance.patch.apply(&mut self.record);

        let now = time_provider.now();
        self.events.emit(Event::PaymentStatusAdvanced {
            occupancy_id: self.id,
            month: advance.month.clone(),
            old_status: advance.old_status,
            new_status: advance.new_status,
            timestamp: now,
        });

        match (advance.new_status, advance.total, &advance.water) {
            (Some(PaymentStatus::Paid), Some(total), Some(bill)) => {
                let water_charge = bill.amount.unwrap_or_default();
                self.events.emit(Event::PaymentCommitted {
                    occupancy_id: self.id,
                    month: advance.month.clone(),
                    rent: self.record.rent,
                    water_charge,
                    utility_surcharge: self.config.utility_surcharge,
                    total,
                    timestamp: now,
                });
            }
            (None, _, _) => {
                self.events.emit(Event::PaymentCleared {
                    occupancy_id: self.id,
                    month: advance.month.clone(),
                    discarded_total,
                    timestamp: now,
                });
            }
            _ => {}
        }

        Ok(advance)
    }

    /// record a meter reading (and its reset flag) for the month
    ///
    /// readings are raw: a value implying negative consumption is accepted
    /// here for inspection, the Paid gate refuses to bill it
    pub fn record_water_reading(
        &mut self,
        month: Month,
        reading: Decimal,
        meter_reset: bool,
        time_provider: &SafeTimeProvider,
    ) -> Result<OccupancyPatch> {
        if reading < Decimal::ZERO {
            return Err(BillingError::NegativeReading { value: reading });
        }

        let key = month.key();
        if month.is_future(time_provider) {
            return Err(BillingError::FutureMonth { key });
        }

        let patch = OccupancyPatch::new(self.id)
            .with(OccupancyField::WaterReading {
                key: key.clone(),
                value: Some(reading),
            })
            .with(OccupancyField::MeterReset {
                key: key.clone(),
                value: meter_reset,
            });
        patch.apply(&mut self.record);

        self.events.emit(Event::WaterReadingRecorded {
            occupancy_id: self.id,
            month: key,
            reading,
            meter_reset,
            timestamp: time_provider.now(),
        });

        Ok(patch)
    }

    /// inspection-only water bill for the month
    pub fn water_bill(&self, month: Month) -> WaterBill {
        let rate = self.config.effective_water_rate(&self.record);
        WaterBillingEngine::from_config(&self.config).compute(&self.record.ledger, month, rate)
    }

    /// change the occupancy status
    pub fn set_status(
        &mut self,
        new_status: OccupancyStatus,
        time_provider: &SafeTimeProvider,
    ) -> OccupancyPatch {
        let old_status = self.record.status;
        let patch = OccupancyPatch::new(self.id).with(OccupancyField::Status { value: new_status });
        patch.apply(&mut self.record);

        self.events.emit(Event::OccupancyStatusChanged {
            occupancy_id: self.id,
            old_status,
            new_status,
            timestamp: time_provider.now(),
        });

        patch
    }

    /// get events
    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }
}
