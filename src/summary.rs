use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::calendar::{Month, MonthKey};
use crate::catalog::{find_occupancy, Room};
use crate::decimal::Money;
use crate::expense::Expense;
use crate::occupancy::{billing_source_for, Occupancy};
use crate::types::PaymentStatus;

/// dashboard totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub rent_collected: Money,
    pub rent_pending: Money,
    pub expenses: Money,
}

/// tolerant coercion of an absent amount to zero
///
/// aggregation never fails for a malformed record; a missing total degrades
/// the displayed sum instead of aborting the whole computation
pub fn lenient_amount(value: Option<Money>) -> Money {
    value.unwrap_or(Money::ZERO)
}

/// total rent collected across all rooms for the month
///
/// future months short-circuit to zero regardless of stored data; archived
/// snapshots supply history for months predating the current tenancy
pub fn rent_collected(
    rooms: &[Room],
    occupancies: &[Occupancy],
    month: Month,
    time_provider: &SafeTimeProvider,
) -> Money {
    if month.is_future(time_provider) {
        return Money::ZERO;
    }

    let key = month.key();
    let mut total = Money::ZERO;
    for room in rooms {
        let Some(occupancy) = find_occupancy(occupancies, &room.room_id) else {
            continue;
        };
        let source = billing_source_for(occupancy, &key);
        if source.status(&key) == Some(PaymentStatus::Paid) {
            total += lenient_amount(source.settled_amount(&key));
        }
    }
    total
}

/// total rent still pending across all rooms for the month
///
/// sums the supplying record's base rent, since pending months have no
/// committed total by construction
pub fn rent_pending(
    rooms: &[Room],
    occupancies: &[Occupancy],
    month: Month,
    time_provider: &SafeTimeProvider,
) -> Money {
    if month.is_future(time_provider) {
        return Money::ZERO;
    }

    let key = month.key();
    let mut total = Money::ZERO;
    for room in rooms {
        let Some(occupancy) = find_occupancy(occupancies, &room.room_id) else {
            continue;
        };
        let source = billing_source_for(occupancy, &key);
        if source.status(&key) == Some(PaymentStatus::Pending) {
            total += source.rent();
        }
    }
    total
}

/// sum of expenses recorded for the month; not subject to the future lock
pub fn expenses_for_month(expenses: &[Expense], month: Month) -> Money {
    let key = month.key();
    expenses
        .iter()
        .filter(|expense| expense.month_key == key)
        .fold(Money::ZERO, |total, expense| total + expense.amount)
}

/// the dashboard triple for one month
pub fn monthly_summary(
    rooms: &[Room],
    occupancies: &[Occupancy],
    expenses: &[Expense],
    month: Month,
    time_provider: &SafeTimeProvider,
) -> MonthlySummary {
    MonthlySummary {
        month: month.key(),
        rent_collected: rent_collected(rooms, occupancies, month, time_provider),
        rent_pending: rent_pending(rooms, occupancies, month, time_provider),
        expenses: expenses_for_month(expenses, month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occupancy::{ArchivedTenant, BillingLedger};
    use crate::types::ExpenseCategory;
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn fixed_clock() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
        ))
    }

    fn march() -> Month {
        Month::new(2024, 2).unwrap()
    }

    fn rooms() -> Vec<Room> {
        vec![Room::new("05", "201"), Room::new("06", "202")]
    }

    fn paid_occupancy(room_id: &str, room_no: &str, total: i64) -> Occupancy {
        let mut occupancy = Occupancy::new(room_id, room_no, "Tenant", Money::from_major(5000));
        occupancy
            .ledger
            .payment_history
            .insert(march().key(), PaymentStatus::Paid);
        occupancy
            .ledger
            .payment_totals
            .insert(march().key(), Money::from_major(total));
        occupancy
    }

    #[test]
    fn test_rent_collected_sums_paid_totals() {
        let time = fixed_clock();
        let occupancies = vec![
            paid_occupancy("201", "05", 5130),
            paid_occupancy("202", "06", 5400),
        ];

        let collected = rent_collected(&rooms(), &occupancies, march(), &time);
        assert_eq!(collected, Money::from_major(10530));
    }

    #[test]
    fn test_future_month_short_circuits() {
        let time = fixed_clock();
        let occupancies = vec![paid_occupancy("201", "05", 5130)];
        let april = Month::new(2024, 3).unwrap();

        // stored data for april is ignored outright
        let mut with_april = occupancies.clone();
        with_april[0]
            .ledger
            .payment_history
            .insert(april.key(), PaymentStatus::Paid);
        with_april[0]
            .ledger
            .payment_totals
            .insert(april.key(), Money::from_major(9999));

        assert_eq!(rent_collected(&rooms(), &with_april, april, &time), Money::ZERO);
        assert_eq!(rent_pending(&rooms(), &with_april, april, &time), Money::ZERO);
    }

    #[test]
    fn test_archived_fallback() {
        let time = fixed_clock();

        let mut archived_ledger = BillingLedger::new();
        archived_ledger
            .payment_history
            .insert(march().key(), PaymentStatus::Paid);
        archived_ledger
            .payment_totals
            .insert(march().key(), Money::from_major(5400));

        // current occupant has no history for march; the previous one paid
        let mut occupancy = Occupancy::new("201", "05", "New Tenant", Money::from_major(5200));
        occupancy.archived_tenant = Some(ArchivedTenant {
            tenant: "Old Tenant".to_string(),
            rent: Money::from_major(4800),
            moved_out: Some(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()),
            ledger: archived_ledger,
        });

        let collected = rent_collected(&rooms(), &[occupancy], march(), &time);
        assert_eq!(collected, Money::from_major(5400));
    }

    #[test]
    fn test_pending_from_archived_rent() {
        let time = fixed_clock();

        let mut archived_ledger = BillingLedger::new();
        archived_ledger
            .payment_history
            .insert(march().key(), PaymentStatus::Pending);

        let mut occupancy = Occupancy::new("201", "05", "New Tenant", Money::from_major(5200));
        occupancy.archived_tenant = Some(ArchivedTenant {
            tenant: "Old Tenant".to_string(),
            rent: Money::from_major(4800),
            moved_out: None,
            ledger: archived_ledger,
        });

        // the archived record supplied the status, so its rent is summed
        let pending = rent_pending(&rooms(), &[occupancy], march(), &time);
        assert_eq!(pending, Money::from_major(4800));
    }

    #[test]
    fn test_pending_uses_current_rent() {
        let time = fixed_clock();
        let mut occupancy = Occupancy::new("201", "05", "Tenant", Money::from_major(5000));
        occupancy
            .ledger
            .payment_history
            .insert(march().key(), PaymentStatus::Pending);

        let pending = rent_pending(&rooms(), &[occupancy], march(), &time);
        assert_eq!(pending, Money::from_major(5000));
    }

    #[test]
    fn test_rooms_without_occupancy_contribute_nothing() {
        let time = fixed_clock();
        let occupancies = vec![paid_occupancy("201", "05", 5130)];

        // room "202" resolves to no occupancy and is skipped
        let collected = rent_collected(&rooms(), &occupancies, march(), &time);
        assert_eq!(collected, Money::from_major(5130));
    }

    #[test]
    fn test_expense_sum_scenario() {
        let time = fixed_clock();
        let expenses = vec![
            Expense::new(
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                ExpenseCategory::Repairs,
                Money::from_major(500),
                "",
                &time,
            )
            .unwrap(),
            Expense::new(
                NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
                ExpenseCategory::Cleaning,
                Money::from_major(300),
                "",
                &time,
            )
            .unwrap(),
        ];

        assert_eq!(expenses_for_month(&expenses, march()), Money::from_major(500));

        // expenses ignore the future lock
        let april = Month::new(2024, 3).unwrap();
        assert_eq!(expenses_for_month(&expenses, april), Money::from_major(300));
    }

    #[test]
    fn test_lenient_amount() {
        assert_eq!(lenient_amount(None), Money::ZERO);
        assert_eq!(lenient_amount(Some(Money::from_major(42))), Money::from_major(42));
    }

    #[test]
    fn test_monthly_summary() {
        let time = fixed_clock();
        let mut pending = Occupancy::new("202", "06", "Second", Money::from_major(5200));
        pending
            .ledger
            .payment_history
            .insert(march().key(), PaymentStatus::Pending);
        let occupancies = vec![paid_occupancy("201", "05", 5130), pending];

        let expenses = vec![Expense::new(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            ExpenseCategory::Salary,
            Money::from_major(2000),
            "",
            &time,
        )
        .unwrap()];

        let summary = monthly_summary(&rooms(), &occupancies, &expenses, march(), &time);
        assert_eq!(summary.month.as_str(), "2024-Mar");
        assert_eq!(summary.rent_collected, Money::from_major(5130));
        assert_eq!(summary.rent_pending, Money::from_major(5200));
        assert_eq!(summary.expenses, Money::from_major(2000));
    }
}
