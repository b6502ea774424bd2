use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::debt::Debt;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::history::BalanceHistory;
use crate::types::{DebtId, InterestPeriod, Payment};

/// headline figures for a debt on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoffSummary {
    pub debt_id: DebtId,
    pub name: String,
    pub principal: Money,
    #[serde(with = "crate::debt::percent")]
    pub interest_rate: Rate,
    pub interest_period: InterestPeriod,
    pub as_of: NaiveDate,
    pub current_balance: Money,
    pub total_paid: Money,
    pub total_interest: Money,
    pub payment_count: usize,
    pub last_payment_date: Option<NaiveDate>,
    pub paid_off: bool,
}

impl PayoffSummary {
    pub fn compute(debt: &Debt, payments: &[Payment], time_provider: &SafeTimeProvider) -> Result<Self> {
        Self::compute_with(&BalanceHistory::new(), debt, payments, time_provider.now().date_naive())
    }

    pub fn compute_with(
        history: &BalanceHistory,
        debt: &Debt,
        payments: &[Payment],
        as_of: NaiveDate,
    ) -> Result<Self> {
        let timeline = history.timeline(debt, payments, as_of)?;
        let dp = history.config().balance_dp;
        let current_balance = timeline.final_balance.round_dp(dp);

        Ok(Self {
            debt_id: debt.id,
            name: debt.name.clone(),
            principal: debt.principal,
            interest_rate: debt.interest_rate,
            interest_period: debt.interest_period,
            as_of,
            current_balance,
            total_paid: timeline.total_paid.round_dp(dp),
            total_interest: timeline.total_interest.round_dp(dp),
            payment_count: timeline.payment_count,
            last_payment_date: timeline.last_payment_date,
            paid_off: current_balance.is_zero(),
        })
    }

    /// share of the principal paid off so far, `None` for a zero principal
    pub fn progress(&self) -> Option<Rate> {
        if self.principal.is_zero() {
            return None;
        }
        let remaining = self.current_balance.min(self.principal);
        let paid = self.principal - remaining;
        Some(Rate::from_decimal(paid.as_decimal() / self.principal.as_decimal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn textbook_plan() -> Debt {
        Debt::builder()
            .name("Textbook Payment Plan")
            .principal(Money::from_major(320))
            .start_date(date(2024, 9, 1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_paid_off_plan() {
        let payments: Vec<Payment> = [(2024, 10), (2024, 11), (2024, 12), (2025, 1)]
            .iter()
            .map(|&(y, m)| Payment::new(date(y, m, 1), Money::from_major(80)))
            .collect();
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()));

        let summary = PayoffSummary::compute(&textbook_plan(), &payments, &time).unwrap();

        assert_eq!(summary.current_balance, Money::ZERO);
        assert_eq!(summary.total_paid, Money::from_major(320));
        assert_eq!(summary.total_interest, Money::ZERO);
        assert_eq!(summary.payment_count, 4);
        assert_eq!(summary.last_payment_date, Some(date(2025, 1, 1)));
        assert!(summary.paid_off);
        assert_eq!(summary.progress(), Some(Rate::ONE));
    }

    #[test]
    fn test_interest_bearing_summary() {
        let debt = Debt::builder()
            .name("Loan")
            .principal(Money::from_major(1_000))
            .rate_percent(dec!(12))
            .start_date(date(2024, 1, 1))
            .build()
            .unwrap();
        let payments = vec![Payment::new(date(2024, 2, 1), Money::from_major(100))];

        let summary =
            PayoffSummary::compute_with(&BalanceHistory::new(), &debt, &payments, date(2024, 2, 1)).unwrap();

        assert_eq!(summary.current_balance, Money::from_str_exact("910.19").unwrap());
        assert_eq!(summary.total_interest, Money::from_str_exact("10.19").unwrap());
        assert_eq!(summary.total_paid, Money::from_major(100));
        assert!(!summary.paid_off);
        assert_eq!(
            summary.progress().map(|r| r.as_decimal().round_dp(4)),
            Some(dec!(0.0898))
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["interestRate"], "12");
        assert_eq!(json["currentBalance"], "910.19");
    }

    #[test]
    fn test_zero_principal_has_no_progress() {
        let debt = Debt::builder()
            .name("Empty")
            .principal(Money::ZERO)
            .start_date(date(2024, 1, 1))
            .build()
            .unwrap();
        let summary = PayoffSummary::compute_with(&BalanceHistory::new(), &debt, &[], date(2024, 5, 1)).unwrap();
        assert!(summary.paid_off);
        assert_eq!(summary.progress(), None);
    }
}
