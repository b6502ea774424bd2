pub mod accrual;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::types::InterestPeriod;

pub use accrual::{days_between, AccrualEngine};

/// interest calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub period_rate: Rate,
    pub periods: Decimal,
    pub days: Decimal,
    pub balance_base: Money,
}

/// trait for interest calculations over a date span
pub trait InterestCalculator {
    fn calculate_interest(
        &self,
        balance: Money,
        rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> InterestCalculation;

    fn get_period_rate(&self, annual_rate: Rate) -> Rate;
}

/// Simple interest on `balance` for `days` elapsed days.
///
/// The annual rate is split into `period` sized rates and multiplied by the
/// (fractional) number of periods the days cover. Nothing is capitalized:
/// callers add the result to their running balance themselves. Zero or
/// negative days give zero.
pub fn compute_interest(balance: Money, rate: Rate, period: InterestPeriod, days: Decimal) -> Money {
    AccrualEngine::new(period).interest_for_days(balance, rate, days)
}
