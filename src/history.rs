use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, trace, warn};

use crate::config::CalculatorConfig;
use crate::debt::Debt;
use crate::decimal::Money;
use crate::errors::Result;
use crate::interest::{AccrualEngine, InterestCalculation, InterestCalculator};
use crate::types::{BalancePoint, Payment};

/// balance series plus the running totals gathered while building it
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceTimeline {
    pub points: Vec<BalancePoint>,
    /// unrounded balance after the last point
    pub final_balance: Money,
    pub total_interest: Money,
    /// one entry per accrual step, in date order
    pub accruals: Vec<InterestCalculation>,
    /// amount actually taken off the balance; clamped payments count only what they cleared
    pub total_paid: Money,
    pub payment_count: usize,
    pub last_payment_date: Option<NaiveDate>,
}

/// computes a debt's balance over time from its terms and payment history
#[derive(Debug, Clone, Default)]
pub struct BalanceHistory {
    config: CalculatorConfig,
}

impl BalanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// balance series up to the provider's current date
    pub fn compute(
        &self,
        debt: &Debt,
        payments: &[Payment],
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<BalancePoint>> {
        let today = time_provider.now().date_naive();
        Ok(self.timeline(debt, payments, today)?.points)
    }

    /// Walk the payments in date order, accruing interest between events.
    ///
    /// The series starts at `(start_date, principal)`. A deferred interest
    /// start produces a flat point on that date carrying the balance at the
    /// time. Each payment accrues interest since the later of the previous
    /// point and the interest start, then takes the payment off, floored at
    /// zero. A final point extrapolates to `today` when it lies past both the
    /// last point and the interest start.
    pub fn timeline(&self, debt: &Debt, payments: &[Payment], today: NaiveDate) -> Result<BalanceTimeline> {
        debt.validate()?;
        debt.validate_payments(payments)?;

        let engine = AccrualEngine::with_config(debt.interest_period, &self.config);
        let interest_start = debt.interest_start_date;

        let mut sorted = payments.to_vec();
        sorted.sort_by_key(|p| p.date);

        let mut balance = debt.principal;
        let mut accruals = Vec::new();
        let mut total_paid = Money::ZERO;
        let mut last_date = debt.start_date;
        let mut interest_marker_pending = debt.has_deferred_interest();
        let mut points = vec![self.point(debt.start_date, balance)];

        for payment in &sorted {
            if interest_marker_pending && payment.date >= interest_start {
                points.push(self.point(interest_start, balance));
                last_date = interest_start;
                interest_marker_pending = false;
            }

            if payment.date >= interest_start {
                let accrual = engine.calculate_interest(
                    balance,
                    debt.interest_rate,
                    last_date.max(interest_start),
                    payment.date,
                );
                trace!(date = %payment.date, interest = %accrual.interest_amount, "accrued interest before payment");
                balance += accrual.interest_amount;
                accruals.push(accrual);
            }

            if payment.amount > balance {
                warn!(
                    debt_id = %debt.id,
                    date = %payment.date,
                    amount = %payment.amount,
                    %balance,
                    "payment exceeds balance, clamping at zero"
                );
            }
            let after = balance.saturating_sub(payment.amount);
            total_paid += balance - after;
            balance = after;

            points.push(self.point(payment.date, balance));
            last_date = payment.date;
        }

        if interest_marker_pending {
            points.push(self.point(interest_start, balance));
            last_date = interest_start;
        }

        if today > last_date && today > interest_start {
            let accrual = engine.calculate_interest(
                balance,
                debt.interest_rate,
                last_date.max(interest_start),
                today,
            );
            balance += accrual.interest_amount;
            accruals.push(accrual);
            points.push(self.point(today, balance));
        }

        debug!(
            debt_id = %debt.id,
            payments = sorted.len(),
            points = points.len(),
            final_balance = %balance,
            "computed balance history"
        );

        Ok(BalanceTimeline {
            points,
            final_balance: balance,
            total_interest: accruals.iter().map(|a| a.interest_amount).sum(),
            accruals,
            total_paid,
            payment_count: sorted.len(),
            last_payment_date: sorted.last().map(|p| p.date),
        })
    }

    fn point(&self, date: NaiveDate, balance: Money) -> BalancePoint {
        BalancePoint {
            date,
            balance: balance.round_dp(self.config.balance_dp),
        }
    }
}

/// balance series for `debt` with the default calculator settings
pub fn compute_balance_history(
    debt: &Debt,
    payments: &[Payment],
    time_provider: &SafeTimeProvider,
) -> Result<Vec<BalancePoint>> {
    BalanceHistory::new().compute(debt, payments, time_provider)
}
