use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthKey;
use crate::decimal::Money;
use crate::types::{ExpenseCategory, ExpenseId, OccupancyId, OccupancyStatus, PaymentStatus};

/// all events that can be emitted by billing operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // payment status events
    PaymentStatusAdvanced {
        occupancy_id: OccupancyId,
        month: MonthKey,
        old_status: Option<PaymentStatus>,
        new_status: Option<PaymentStatus>,
        timestamp: DateTime<Utc>,
    },
    PaymentCommitted {
        occupancy_id: OccupancyId,
        month: MonthKey,
        rent: Money,
        water_charge: Money,
        utility_surcharge: Money,
        total: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentCleared {
        occupancy_id: OccupancyId,
        month: MonthKey,
        discarded_total: Option<Money>,
        timestamp: DateTime<Utc>,
    },

    // water meter events
    WaterReadingRecorded {
        occupancy_id: OccupancyId,
        month: MonthKey,
        reading: Decimal,
        meter_reset: bool,
        timestamp: DateTime<Utc>,
    },

    // occupancy events
    OccupancyStatusChanged {
        occupancy_id: OccupancyId,
        old_status: OccupancyStatus,
        new_status: OccupancyStatus,
        timestamp: DateTime<Utc>,
    },

    // expense events
    ExpenseRecorded {
        expense_id: ExpenseId,
        month: MonthKey,
        category: ExpenseCategory,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    ExpenseDeleted {
        expense_id: ExpenseId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
