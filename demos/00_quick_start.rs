/// quick start - balance history for a single loan
use chrono::NaiveDate;
use debt_balance_rs::{compute_balance_history, Debt, Money, Payment, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let loan = Debt::builder()
        .name("Car Loan")
        .principal(Money::from_major(1_000))
        .rate_percent(dec!(12))
        .start_date(start)
        .build()?;

    let payments = vec![Payment::new(
        NaiveDate::from_ymd_opt(2024, 2, 1).ok_or("bad date")?,
        Money::from_major(100),
    )];

    let time = SafeTimeProvider::new(TimeSource::System);
    for point in compute_balance_history(&loan, &payments, &time)? {
        println!("{}  ${}", point.date, point.balance);
    }

    Ok(())
}
