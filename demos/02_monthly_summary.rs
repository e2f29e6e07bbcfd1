/// monthly summary - dashboard totals with an archived-tenant fallback
use chrono::{NaiveDate, TimeZone, Utc};
use rent_ledger_rs::{
    monthly_summary, ArchivedTenant, BillingLedger, Expense, ExpenseCategory, ExpenseLedger,
    Money, Month, Occupancy, PaymentStatus, Room,
};
use rent_ledger_rs::{SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
    ));

    let rooms = vec![Room::new("05", "201"), Room::new("06", "202")];
    let march = Month::new(2024, 2)?;

    // room 201 turned over in march; the previous occupant's paid month
    // lives in the archived snapshot
    let mut archived_ledger = BillingLedger::new();
    archived_ledger
        .payment_history
        .insert(march.key(), PaymentStatus::Paid);
    archived_ledger
        .payment_totals
        .insert(march.key(), Money::from_major(5400));

    let mut turned_over = Occupancy::new("201", "05", "New Tenant", Money::from_major(5200));
    turned_over.archived_tenant = Some(ArchivedTenant {
        tenant: "Old Tenant".to_string(),
        rent: Money::from_major(4800),
        moved_out: Some(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()),
        ledger: archived_ledger,
    });

    // room 202 is still waiting on this month's rent
    let mut waiting = Occupancy::new("202", "06", "B. Rao", Money::from_major(5200));
    waiting
        .ledger
        .payment_history
        .insert(march.key(), PaymentStatus::Pending);

    // march expenses
    let mut expenses = ExpenseLedger::new();
    expenses.record(Expense::new(
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        ExpenseCategory::Plumbing,
        Money::from_major(500),
        "kitchen tap",
        &time,
    )?);
    expenses.record(Expense::new(
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        ExpenseCategory::Salary,
        Money::from_major(2000),
        "caretaker",
        &time,
    )?);

    let occupancies = vec![turned_over, waiting];
    let summary = monthly_summary(&rooms, &occupancies, expenses.entries(), march, &time);

    println!("{}", march.label());
    println!("  rent collected: {}", summary.rent_collected); // 5400 from the archive
    println!("  rent pending:   {}", summary.rent_pending); // 5200
    println!("  expenses:       {}", summary.expenses); // 2500

    Ok(())
}
