/// time control - watch the "today" point move with a test clock
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use debt_balance_rs::{
    generate_chart_series, Debt, InterestPeriod, Money, Payment, PayoffSummary, SafeTimeProvider,
    TimeSource,
};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let card = Debt::builder()
        .name("Student Credit Card")
        .principal(Money::from_major(450))
        .rate_percent(dec!(18.99))
        .interest_period(InterestPeriod::Daily)
        .start_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .build()?;

    let payments: Vec<Payment> = (7..=12)
        .map(|m| Payment::new(NaiveDate::from_ymd_opt(2024, m, 1).unwrap(), Money::from_major(50)))
        .collect();

    for _ in 0..3 {
        controller.advance(Duration::days(90));
        let summary = PayoffSummary::compute(&card, &payments, &time)?;
        println!(
            "{}: balance ${} (interest so far ${})",
            summary.as_of, summary.current_balance, summary.total_interest
        );
    }

    let chart = generate_chart_series(&card, &payments, &time)?;
    println!("\n{}", chart.to_json_pretty()?);

    Ok(())
}
