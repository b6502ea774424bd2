use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::interest::{InterestCalculation, InterestCalculator};
use crate::types::InterestPeriod;

/// whole days from `start` to `end`, zero if `end` is not after `start`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Decimal {
    Decimal::from((end - start).num_days().max(0))
}

/// engine for accruing simple interest at a debt's compounding basis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccrualEngine {
    pub period: InterestPeriod,
    pub day_basis: u32,
}

impl AccrualEngine {
    pub fn new(period: InterestPeriod) -> Self {
        Self::with_config(period, &CalculatorConfig::default())
    }

    pub fn with_config(period: InterestPeriod, config: &CalculatorConfig) -> Self {
        Self {
            period,
            day_basis: config.day_basis,
        }
    }

    /// number of compounding periods covered by `days`
    pub fn periods_for_days(&self, days: Decimal) -> Decimal {
        days / Decimal::from(self.day_basis) * Decimal::from(self.period.periods_per_year())
    }

    /// interest for a possibly fractional number of days
    pub fn interest_for_days(&self, balance: Money, annual_rate: Rate, days: Decimal) -> Money {
        if days <= Decimal::ZERO || annual_rate.is_zero() {
            return Money::ZERO;
        }
        let period_rate = self.get_period_rate(annual_rate).as_decimal();
        let periods = self.periods_for_days(days);
        Money::from_decimal(balance.as_decimal() * period_rate * periods)
    }
}

impl InterestCalculator for AccrualEngine {
    fn calculate_interest(
        &self,
        balance: Money,
        rate: Rate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> InterestCalculation {
        let days = days_between(start_date, end_date);

        InterestCalculation {
            interest_amount: self.interest_for_days(balance, rate, days),
            period_rate: self.get_period_rate(rate),
            periods: self.periods_for_days(days),
            days,
            balance_base: balance,
        }
    }

    fn get_period_rate(&self, annual_rate: Rate) -> Rate {
        Rate::from_decimal(annual_rate.as_decimal() / Decimal::from(self.period.periods_per_year()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 2, 1)), dec!(31));
        // leap day counted
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), dec!(2));
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 2, 1)), Decimal::ZERO);
    }

    #[test]
    fn test_period_rate() {
        let rate = Rate::from_percentage(dec!(12));
        assert_eq!(
            AccrualEngine::new(InterestPeriod::Monthly).get_period_rate(rate),
            Rate::from_decimal(dec!(0.01))
        );
        assert_eq!(
            AccrualEngine::new(InterestPeriod::Annually).get_period_rate(rate),
            Rate::from_decimal(dec!(0.12))
        );
    }

    #[test]
    fn test_calculate_interest_between_dates() {
        let engine = AccrualEngine::new(InterestPeriod::Monthly);
        let calc = engine.calculate_interest(
            Money::from_major(1_000),
            Rate::from_percentage(dec!(12)),
            date(2024, 1, 1),
            date(2024, 2, 1),
        );

        assert_eq!(calc.days, dec!(31));
        assert_eq!(calc.balance_base, Money::from_major(1_000));
        assert_eq!(calc.interest_amount.round_cents(), Money::from_str_exact("10.19").unwrap());
        assert!(calc.periods > Decimal::ONE && calc.periods < dec!(1.02));
    }

    #[test]
    fn test_custom_day_basis() {
        let config = CalculatorConfig {
            day_basis: 360,
            ..CalculatorConfig::default()
        };
        let engine = AccrualEngine::with_config(InterestPeriod::Daily, &config);
        let interest = engine.interest_for_days(
            Money::from_major(36_000),
            Rate::from_percentage(dec!(10)),
            dec!(1),
        );
        // daily rate uses 365 periods, elapsed periods use 360 days
        assert_eq!(interest.round_cents(), Money::from_major(10));
    }
}
