pub mod calendar;
pub mod catalog;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod expense;
pub mod occupancy;
pub mod payments;
pub mod storage;
pub mod summary;
pub mod tenancy;
pub mod types;
pub mod water;

// re-export key types
pub use calendar::{Month, MonthKey, MONTH_ABBREV};
pub use catalog::{find_occupancy, is_occupied, PropertyCatalog, Room};
pub use config::{BillingConfig, WaterRateTable};
pub use decimal::{Money, Rate};
pub use errors::{BillingError, Result};
pub use events::{Event, EventStore};
pub use expense::{Expense, ExpenseLedger};
pub use occupancy::{
    billing_source_for, ArchivedTenant, BillingLedger, BillingSource, Occupancy,
};
pub use payments::{next_status, StatusAdvance, StatusEngine};
pub use storage::{DocumentStore, MemoryStore, OccupancyField, OccupancyPatch};
pub use summary::{
    expenses_for_month, lenient_amount, monthly_summary, rent_collected, rent_pending,
    MonthlySummary,
};
pub use tenancy::Tenancy;
pub use types::{
    ExpenseCategory, ExpenseId, OccupancyId, OccupancyStatus, PaymentStatus,
};
pub use water::{WaterBill, WaterBillingEngine};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
