use rust_decimal::Decimal;
use serde_json::Value;

use crate::calendar::MonthKey;
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::expense::Expense;
use crate::occupancy::Occupancy;
use crate::types::{ExpenseId, OccupancyId, OccupancyStatus, PaymentStatus};

/// one typed field of a partial occupancy update
///
/// the core operates on these; the external document store receives them as
/// dotted paths (e.g. `paymentHistory.2024-Mar`) with json values
#[derive(Debug, Clone, PartialEq)]
pub enum OccupancyField {
    PaymentStatus {
        key: MonthKey,
        value: Option<PaymentStatus>,
    },
    PaymentTotal {
        key: MonthKey,
        value: Option<Money>,
    },
    WaterReading {
        key: MonthKey,
        value: Option<Decimal>,
    },
    MeterReset {
        key: MonthKey,
        value: bool,
    },
    Status {
        value: OccupancyStatus,
    },
}

impl OccupancyField {
    /// dotted wire path of this field
    pub fn path(&self) -> String {
        match self {
            OccupancyField::PaymentStatus { key, .. } => format!("paymentHistory.{}", key),
            OccupancyField::PaymentTotal { key, .. } => format!("paymentTotals.{}", key),
            OccupancyField::WaterReading { key, .. } => format!("waterReadings.{}", key),
            OccupancyField::MeterReset { key, .. } => format!("waterMeterReset.{}", key),
            OccupancyField::Status { .. } => "status".to_string(),
        }
    }

    /// json value written at the path; cleared fields write null
    pub fn value(&self) -> Value {
        match self {
            OccupancyField::PaymentStatus { value, .. } => match value {
                Some(status) => Value::String(status.as_str().to_string()),
                None => Value::Null,
            },
            OccupancyField::PaymentTotal { value, .. } => match value {
                Some(total) => Value::String(total.as_decimal().to_string()),
                None => Value::Null,
            },
            OccupancyField::WaterReading { value, .. } => match value {
                Some(reading) => Value::String(reading.to_string()),
                None => Value::Null,
            },
            OccupancyField::MeterReset { value, .. } => Value::Bool(*value),
            OccupancyField::Status { value } => Value::String(value.as_str().to_string()),
        }
    }
}

/// atomic multi-field update to one occupancy document
///
/// applied as a whole or not at all; concurrent edits are last-write-wins,
/// there is no version check
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyPatch {
    pub occupancy_id: OccupancyId,
    pub fields: Vec<OccupancyField>,
}

impl OccupancyPatch {
    pub fn new(occupancy_id: OccupancyId) -> Self {
        Self {
            occupancy_id,
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, field: OccupancyField) -> Self {
        self.fields.push(field);
        self
    }

    /// apply the update to an in-memory occupancy snapshot
    pub fn apply(&self, record: &mut Occupancy) {
        for field in &self.fields {
            match field {
                OccupancyField::PaymentStatus { key, value } => match value {
                    Some(status) => {
                        record.ledger.payment_history.insert(key.clone(), *status);
                    }
                    None => {
                        record.ledger.payment_history.remove(key);
                    }
                },
                OccupancyField::PaymentTotal { key, value } => match value {
                    Some(total) => {
                        record.ledger.payment_totals.insert(key.clone(), *total);
                    }
                    None => {
                        record.ledger.payment_totals.remove(key);
                    }
                },
                OccupancyField::WaterReading { key, value } => match value {
                    Some(reading) => {
                        record.ledger.water_readings.insert(key.clone(), *reading);
                    }
                    None => {
                        record.ledger.water_readings.remove(key);
                    }
                },
                OccupancyField::MeterReset { key, value } => {
                    record.ledger.water_meter_reset.insert(key.clone(), *value);
                }
                OccupancyField::Status { value } => {
                    record.status = *value;
                }
            }
        }
    }

    /// dotted-path form handed to the external document store
    pub fn wire_updates(&self) -> Vec<(String, Value)> {
        self.fields
            .iter()
            .map(|field| (field.path(), field.value()))
            .collect()
    }
}

/// minimal contract of the external document-oriented storage collaborator
pub trait DocumentStore {
    /// apply a partial-field update atomically to one occupancy document
    fn apply_patch(&mut self, patch: &OccupancyPatch) -> Result<()>;

    /// append a whole expense document
    fn insert_expense(&mut self, expense: Expense) -> Result<()>;

    /// delete an expense document by id
    fn delete_expense(&mut self, id: ExpenseId) -> Result<Expense>;
}

/// in-memory store used by tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub occupancies: Vec<Occupancy>,
    pub expenses: Vec<Expense>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupancy(&self, id: OccupancyId) -> Option<&Occupancy> {
        self.occupancies.iter().find(|occupancy| occupancy.id == id)
    }
}

impl DocumentStore for MemoryStore {
    fn apply_patch(&mut self, patch: &OccupancyPatch) -> Result<()> {
        let record = self
            .occupancies
            .iter_mut()
            .find(|occupancy| occupancy.id == patch.occupancy_id)
            .ok_or(BillingError::OccupancyNotFound {
                id: patch.occupancy_id,
            })?;
        patch.apply(record);
        Ok(())
    }

    fn insert_expense(&mut self, expense: Expense) -> Result<()> {
        self.expenses.push(expense);
        Ok(())
    }

    fn delete_expense(&mut self, id: ExpenseId) -> Result<Expense> {
        let position = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(BillingError::ExpenseNotFound { id })?;
        Ok(self.expenses.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;
    use rust_decimal_macros::dec;

    fn march() -> MonthKey {
        Month::new(2024, 2).unwrap().key()
    }

    #[test]
    fn test_wire_paths() {
        let patch = OccupancyPatch::new(uuid::Uuid::new_v4())
            .with(OccupancyField::PaymentStatus {
                key: march(),
                value: Some(PaymentStatus::Paid),
            })
            .with(OccupancyField::PaymentTotal {
                key: march(),
                value: Some(Money::from_major(5400)),
            });

        let updates = patch.wire_updates();
        assert_eq!(updates[0].0, "paymentHistory.2024-Mar");
        assert_eq!(updates[0].1, Value::String("Paid".to_string()));
        assert_eq!(updates[1].0, "paymentTotals.2024-Mar");
        assert_eq!(updates[1].1, Value::String("5400".to_string()));
    }

    #[test]
    fn test_null_clears_field() {
        let field = OccupancyField::PaymentTotal {
            key: march(),
            value: None,
        };
        assert_eq!(field.value(), Value::Null);
    }

    #[test]
    fn test_apply_inserts_and_clears() {
        let mut record = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));

        let patch = OccupancyPatch::new(record.id)
            .with(OccupancyField::PaymentStatus {
                key: march(),
                value: Some(PaymentStatus::Paid),
            })
            .with(OccupancyField::PaymentTotal {
                key: march(),
                value: Some(Money::from_major(5400)),
            })
            .with(OccupancyField::WaterReading {
                key: march(),
                value: Some(dec!(115)),
            });
        patch.apply(&mut record);

        assert_eq!(record.ledger.status(&march()), Some(PaymentStatus::Paid));
        assert_eq!(record.ledger.total(&march()), Some(Money::from_major(5400)));
        assert_eq!(record.ledger.reading(&march()), Some(dec!(115)));

        let clear = OccupancyPatch::new(record.id)
            .with(OccupancyField::PaymentStatus {
                key: march(),
                value: None,
            })
            .with(OccupancyField::PaymentTotal {
                key: march(),
                value: None,
            });
        clear.apply(&mut record);

        assert_eq!(record.ledger.status(&march()), None);
        assert_eq!(record.ledger.total(&march()), None);
        assert!(record.ledger.totals_consistent());
    }

    #[test]
    fn test_memory_store_patch() {
        let record = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));
        let id = record.id;
        let mut store = MemoryStore::new();
        store.occupancies.push(record);

        let patch = OccupancyPatch::new(id).with(OccupancyField::Status {
            value: OccupancyStatus::Vacant,
        });
        store.apply_patch(&patch).unwrap();

        assert_eq!(store.occupancy(id).unwrap().status, OccupancyStatus::Vacant);
    }

    #[test]
    fn test_memory_store_unknown_occupancy() {
        let mut store = MemoryStore::new();
        let patch = OccupancyPatch::new(uuid::Uuid::new_v4());

        assert!(matches!(
            store.apply_patch(&patch),
            Err(BillingError::OccupancyNotFound { .. })
        ));
    }
}
