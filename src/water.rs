use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::Month;
use crate::config::BillingConfig;
use crate::decimal::{Money, Rate};
use crate::occupancy::BillingLedger;

/// water bill for one month
///
/// units and amount are None when the month cannot be billed from the
/// recorded readings; negative units are carried through for inspection,
/// the billing-commit gate rejects them separately
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterBill {
    pub current_reading: Option<Decimal>,
    pub previous_reading: Option<Decimal>,
    pub units: Option<Decimal>,
    pub amount: Option<Money>,
    pub meter_reset: bool,
    pub rate: Rate,
}

impl WaterBill {
    pub fn is_billable(&self) -> bool {
        self.amount.is_some()
    }
}

/// engine converting raw meter readings into consumption and cost
pub struct WaterBillingEngine {
    pub unit_multiplier: Decimal,
}

impl WaterBillingEngine {
    pub fn new(unit_multiplier: Decimal) -> Self {
        Self { unit_multiplier }
    }

    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(config.unit_multiplier)
    }

    /// compute the month's water bill from the ledger's readings
    ///
    /// a month flagged as a meter reset bills from zero; otherwise both the
    /// current and previous month's readings are required and consumption is
    /// their delta. pure over (readings, reset flag, rate)
    pub fn compute(&self, ledger: &BillingLedger, month: Month, rate: Rate) -> WaterBill {
        let cur_key = month.key();
        let prev_key = month.previous().key();

        let cur_reading = ledger.reading(&cur_key);
        let prev_reading = ledger.reading(&prev_key);
        let meter_reset = ledger.meter_reset(&cur_key);

        if meter_reset {
            // meter replaced: the reading is absolute, not a delta
            let Some(cur) = cur_reading else {
                return WaterBill {
                    current_reading: None,
                    previous_reading: prev_reading,
                    units: None,
                    amount: None,
                    meter_reset: true,
                    rate,
                };
            };
            let units = cur * self.unit_multiplier;
            return WaterBill {
                current_reading: Some(cur),
                previous_reading: prev_reading,
                units: Some(units),
                amount: Some(rate.charge_for(units)),
                meter_reset: true,
                rate,
            };
        }

        let (Some(cur), Some(prev)) = (cur_reading, prev_reading) else {
            return WaterBill {
                current_reading: cur_reading,
                previous_reading: prev_reading,
                units: None,
                amount: None,
                meter_reset: false,
                rate,
            };
        };

        let units = (cur - prev) * self.unit_multiplier;
        WaterBill {
            current_reading: Some(cur),
            previous_reading: Some(prev),
            units: Some(units),
            amount: Some(rate.charge_for(units)),
            meter_reset: false,
            rate,
        }
    }
}
