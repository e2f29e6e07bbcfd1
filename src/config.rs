use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::decimal::{Money, Rate};
use crate::errors::{BillingError, Result};
use crate::occupancy::Occupancy;

/// static per-unit water tariff table
///
/// a small fixed set of high-usage room numbers gets a distinct rate,
/// every other room gets the standard rate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterRateTable {
    pub standard_rate: Rate,
    pub high_usage_rate: Rate,
    pub high_usage_rooms: BTreeSet<String>,
}

impl WaterRateTable {
    /// room-class default tariff for a room number
    pub fn rate_for(&self, room_no: &str) -> Rate {
        if self.high_usage_rooms.contains(room_no.trim()) {
            self.high_usage_rate
        } else {
            self.standard_rate
        }
    }
}

/// billing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// meter display-to-consumption conversion factor
    pub unit_multiplier: Decimal,
    /// flat monthly charge added to every Paid total (common-area electricity share)
    pub utility_surcharge: Money,
    pub water_rates: WaterRateTable,
}

impl BillingConfig {
    /// standard property configuration
    pub fn standard() -> Self {
        Self {
            unit_multiplier: dec!(10),
            utility_surcharge: Money::from_major(100),
            water_rates: WaterRateTable {
                standard_rate: Rate::from_decimal(dec!(0.20)),
                high_usage_rate: Rate::from_decimal(dec!(0.25)),
                high_usage_rooms: ["201", "202", "203"]
                    .iter()
                    .map(|room| room.to_string())
                    .collect(),
            },
        }
    }

    /// effective per-unit tariff for an occupancy: its own override when
    /// present, else the room-class default
    pub fn effective_water_rate(&self, occupancy: &Occupancy) -> Rate {
        match occupancy.water_rate {
            Some(rate) if !rate.is_zero() => rate,
            _ => self.water_rates.rate_for(&occupancy.room_no),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.unit_multiplier <= Decimal::ZERO {
            return Err(BillingError::InvalidConfiguration {
                message: format!("unit multiplier must be positive: {}", self.unit_multiplier),
            });
        }
        if self.utility_surcharge.is_negative() {
            return Err(BillingError::InvalidConfiguration {
                message: format!("utility surcharge cannot be negative: {}", self.utility_surcharge),
            });
        }
        if self.water_rates.standard_rate.as_decimal() <= Decimal::ZERO
            || self.water_rates.high_usage_rate.as_decimal() <= Decimal::ZERO
        {
            return Err(BillingError::InvalidConfiguration {
                message: "water rates must be positive".to_string(),
            });
        }
        Ok(())
    }
}
