/// billing cycle - guards, meter resets, and time control
use chrono::{TimeZone, Utc};
use rent_ledger_rs::{
    BillingConfig, BillingError, Money, Month, Occupancy, Rate, Tenancy,
};
use rent_ledger_rs::{SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // deterministic clock: march 15, 2024
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap(),
    ));
    let control = time.test_control().unwrap();

    let mut record = Occupancy::new("201", "05", "A. Kumar", Money::from_major(5000));
    record.water_rate = Some(Rate::from_decimal(dec!(0.25)));
    let mut tenancy = Tenancy::new(BillingConfig::standard(), record);

    let march = Month::new(2024, 2)?;
    let april = Month::new(2024, 3)?;

    // april is still in the future: the edit is refused
    match tenancy.advance_payment_status(april, &time) {
        Err(BillingError::FutureMonth { key }) => println!("refused: {} is future", key),
        other => println!("unexpected: {:?}", other.map(|a| a.new_status)),
    }

    // marking Paid without water readings is refused at the commit gate
    tenancy.advance_payment_status(march, &time)?; // Pending
    tenancy.advance_payment_status(march, &time)?; // Rent Only
    match tenancy.advance_payment_status(march, &time) {
        Err(BillingError::WaterReadingMissing { key }) => {
            println!("refused: no readings for {}", key)
        }
        other => println!("unexpected: {:?}", other.map(|a| a.new_status)),
    }

    // the meter was replaced in march: one absolute reading suffices
    tenancy.record_water_reading(march, dec!(120), true, &time)?;
    let advance = tenancy.advance_payment_status(march, &time)?;
    println!("march committed: {:?}", advance.total); // 5000 + 300 + 100

    // advance the clock into april and bill the next month as a delta
    control.advance(chrono::Duration::days(20));
    tenancy.record_water_reading(april, dec!(135), false, &time)?;
    let bill = tenancy.water_bill(april);
    println!("april consumption: {:?} units, {:?}", bill.units, bill.amount);

    for event in tenancy.take_events() {
        println!("event: {:?}", event);
    }

    Ok(())
}
