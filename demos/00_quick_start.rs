/// quick start - minimal example to get started
use chrono::Datelike;
use rent_ledger_rs::{BillingConfig, Money, Month, Occupancy, Tenancy};
use rent_ledger_rs::{SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);

    // one occupied room at 5000/month
    let record = Occupancy::new("201", "05", "A. Kumar", Money::from_major(5000));
    let mut tenancy = Tenancy::new(BillingConfig::standard(), record);

    // record last month's and this month's meter readings
    let now = time.now();
    let month = Month::new(now.year(), now.month0())?;
    tenancy.record_water_reading(month.previous(), dec!(100), false, &time)?;
    tenancy.record_water_reading(month, dec!(115), false, &time)?;

    // walk the status cycle: None -> Pending -> Rent Only -> Paid
    tenancy.advance_payment_status(month, &time)?;
    tenancy.advance_payment_status(month, &time)?;
    let advance = tenancy.advance_payment_status(month, &time)?;

    println!("{}: committed total {:?}", month, advance.total);
    println!("wire update: {:?}", advance.patch.wire_updates());

    Ok(())
}
