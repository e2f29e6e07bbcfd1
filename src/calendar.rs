use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{BillingError, Result};

/// fixed month abbreviation table, indexed 0-11
pub const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// opaque key addressing one calendar month of billing facts
///
/// generated only here; every other module treats it as an opaque string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a calendar month addressed by year and zero-based month index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub index: u32,
}

impl Month {
    /// create a month; index must be 0-11
    pub fn new(year: i32, index: u32) -> Result<Self> {
        if index > 11 {
            return Err(BillingError::InvalidMonthIndex { index });
        }
        Ok(Self { year, index })
    }

    /// month containing the given calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            index: date.month0(),
        }
    }

    /// stable sortable key, e.g. "2024-Mar"
    pub fn key(&self) -> MonthKey {
        MonthKey(format!("{}-{}", self.year, MONTH_ABBREV[self.index as usize]))
    }

    /// human label, e.g. "Mar 2024"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_ABBREV[self.index as usize], self.year)
    }

    /// the chronologically preceding month, rolling the year back at january
    pub fn previous(&self) -> Month {
        if self.index == 0 {
            Month {
                year: self.year - 1,
                index: 11,
            }
        } else {
            Month {
                year: self.year,
                index: self.index - 1,
            }
        }
    }

    /// true iff this month is strictly later than the provider's current month
    ///
    /// locks all billing mutation and zeroes aggregation for months not yet reached
    pub fn is_future(&self, time_provider: &SafeTimeProvider) -> bool {
        let now = time_provider.now();
        self.year > now.year() || (self.year == now.year() && self.index > now.month0())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
