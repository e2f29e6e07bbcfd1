use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{Month, MonthKey};
use crate::decimal::Money;
use crate::errors::{BillingError, Result};
use crate::events::{Event, EventStore};
use crate::types::{ExpenseCategory, ExpenseId};

/// one recorded property expense
///
/// created by manual entry, deleted by id, never edited in place; the month
/// key is derived from the date at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub note: String,
    pub month_key: MonthKey,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: ExpenseCategory,
        amount: Money,
        note: impl Into<String>,
        time_provider: &SafeTimeProvider,
    ) -> Result<Self> {
        if !amount.is_positive() {
            return Err(BillingError::InvalidExpenseAmount { amount });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            date,
            category,
            amount,
            note: note.into(),
            month_key: Month::from_date(date).key(),
            created_at: time_provider.now(),
        })
    }
}

/// append-only expense ledger with delete-by-id
#[derive(Debug, Default)]
pub struct ExpenseLedger {
    entries: Vec<Expense>,
    pub events: EventStore,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Expense>) -> Self {
        Self {
            entries,
            events: EventStore::new(),
        }
    }

    pub fn entries(&self) -> &[Expense] {
        &self.entries
    }

    /// record a new expense
    pub fn record(&mut self, expense: Expense) -> ExpenseId {
        let id = expense.id;
        self.events.emit(Event::ExpenseRecorded {
            expense_id: id,
            month: expense.month_key.clone(),
            category: expense.category,
            amount: expense.amount,
            timestamp: expense.created_at,
        });
        self.entries.push(expense);
        id
    }

    /// delete an expense by id
    pub fn delete(&mut self, id: ExpenseId, time_provider: &SafeTimeProvider) -> Result<Expense> {
        let position = self
            .entries
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(BillingError::ExpenseNotFound { id })?;

        let removed = self.entries.remove(position);
        self.events.emit(Event::ExpenseDeleted {
            expense_id: id,
            timestamp: time_provider.now(),
        });
        Ok(removed)
    }

    /// entries recorded for the given month
    pub fn for_month(&self, month: Month) -> impl Iterator<Item = &Expense> {
        let key = month.key();
        self.entries
            .iter()
            .filter(move |expense| expense.month_key == key)
    }
}
