use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::types::{CategoryKind, PeriodType, TransactionKind};

const UNCATEGORIZED: &str = "Uncategorized";

/// inclusive calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Range of the period containing `today`, shifted by `offset` periods.
    ///
    /// Weeks run Sunday through Saturday. Negative offsets go back in time.
    pub fn for_period(period: PeriodType, offset: i32, today: NaiveDate) -> Result<Self> {
        let out_of_range = || DebtError::InvalidDate {
            message: format!("{:?} offset {} from {} is out of range", period, offset, today),
        };

        match period {
            PeriodType::Week => {
                let sunday = week_start(today).ok_or_else(out_of_range)?;
                let start = shift_days(sunday, i64::from(offset) * 7).ok_or_else(out_of_range)?;
                let end = start.checked_add_days(Days::new(6)).ok_or_else(out_of_range)?;
                Ok(Self { start, end })
            }
            PeriodType::Month => {
                let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).ok_or_else(out_of_range)?;
                let start = shift_months(first, offset).ok_or_else(out_of_range)?;
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .ok_or_else(out_of_range)?;
                Ok(Self { start, end })
            }
            PeriodType::Year => {
                let year = today.year().checked_add(offset).ok_or_else(out_of_range)?;
                let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?;
                Ok(Self { start, end })
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// sunday on or before `date`
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// human label of the period containing `date`, e.g. "March 2024";
/// `None` when the week would leave chrono's date range
pub fn period_label(period: PeriodType, date: NaiveDate) -> Option<String> {
    match period {
        PeriodType::Year => Some(date.format("%Y").to_string()),
        PeriodType::Month => Some(date.format("%B %Y").to_string()),
        PeriodType::Week => {
            let start = week_start(date)?;
            let end = start.checked_add_days(Days::new(6))?;
            Some(format!(
                "{} - {}, {}",
                start.format("%B %-d"),
                end.format("%B %-d"),
                start.year()
            ))
        }
    }
}

/// income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: Option<String>,
}

/// spending target for a category over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetGoal {
    pub id: Uuid,
    pub category: String,
    pub category_kind: CategoryKind,
    pub period: PeriodType,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSlice {
    pub category: String,
    pub amount: Money,
}

/// one row of budget utilization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRow {
    pub goal_id: Option<Uuid>,
    pub category: String,
    pub budget: Money,
    pub spent: Money,
}

impl BudgetRow {
    /// spent over budget, `None` when there is no budget
    pub fn utilization(&self) -> Option<Rate> {
        if self.budget.is_zero() {
            return None;
        }
        Some(Rate::from_decimal(self.spent.as_decimal() / self.budget.as_decimal()))
    }

    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    pub expenses: Money,
    pub income: Money,
    pub net: Money,
}

/// dashboard figures for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub period: PeriodType,
    pub date_range: DateRange,
    pub expense_breakdown: Vec<ExpenseSlice>,
    pub budget_data: Vec<BudgetRow>,
    pub totals: Totals,
    pub earliest_transaction_date: Option<NaiveDate>,
    /// label of the period holding the earliest transaction, for navigation bounds
    pub earliest_period_label: Option<String>,
}

impl DashboardReport {
    pub fn build(
        period: PeriodType,
        offset: i32,
        today: NaiveDate,
        transactions: &[Transaction],
        goals: &[BudgetGoal],
    ) -> Result<Self> {
        let date_range = DateRange::for_period(period, offset, today)?;

        let mut expenses_by_category: BTreeMap<String, Money> = BTreeMap::new();
        let mut totals = Totals::default();

        for tx in transactions.iter().filter(|tx| date_range.contains(tx.date)) {
            let amount = tx.amount.abs();
            match tx.kind {
                TransactionKind::Expense => {
                    let category = tx
                        .category
                        .as_deref()
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .unwrap_or(UNCATEGORIZED);
                    *expenses_by_category.entry(category.to_string()).or_default() += amount;
                    totals.expenses += amount;
                }
                TransactionKind::Income => totals.income += amount,
            }
        }
        totals.net = totals.income - totals.expenses;

        let mut budget_data: Vec<BudgetRow> = goals
            .iter()
            .filter(|g| g.period == period && g.category_kind == CategoryKind::Expense)
            .map(|g| BudgetRow {
                goal_id: Some(g.id),
                category: g.category.clone(),
                budget: g.amount,
                spent: expenses_by_category.get(&g.category).copied().unwrap_or_default(),
            })
            .collect();

        for (category, spent) in &expenses_by_category {
            if !budget_data.iter().any(|row| &row.category == category) {
                budget_data.push(BudgetRow {
                    goal_id: None,
                    category: category.clone(),
                    budget: Money::ZERO,
                    spent: *spent,
                });
            }
        }
        budget_data.sort_by(|a, b| b.spent.cmp(&a.spent));

        let mut expense_breakdown: Vec<ExpenseSlice> = expenses_by_category
            .into_iter()
            .map(|(category, amount)| ExpenseSlice { category, amount })
            .collect();
        expense_breakdown.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.category.cmp(&b.category)));

        let earliest_transaction_date = transactions.iter().map(|tx| tx.date).min();

        debug!(
            period = ?period,
            offset,
            start = %date_range.start,
            end = %date_range.end,
            categories = expense_breakdown.len(),
            "built dashboard report"
        );

        Ok(Self {
            period,
            date_range,
            expense_breakdown,
            budget_data,
            totals,
            earliest_transaction_date,
            earliest_period_label: earliest_transaction_date.and_then(|d| period_label(period, d)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(d: NaiveDate, amount: i64, category: Option<&str>) -> Transaction {
        Transaction {
            date: d,
            amount: Money::from_major(amount),
            kind: TransactionKind::Expense,
            category: category.map(str::to_string),
        }
    }

    fn goal(category: &str, period: PeriodType, amount: i64) -> BudgetGoal {
        BudgetGoal {
            id: Uuid::new_v4(),
            category: category.to_string(),
            category_kind: CategoryKind::Expense,
            period,
            amount: Money::from_major(amount),
        }
    }

    #[test]
    fn test_week_range_runs_sunday_to_saturday() {
        // 2024-03-13 is a wednesday
        let range = DateRange::for_period(PeriodType::Week, 0, date(2024, 3, 13)).unwrap();
        assert_eq!(range, DateRange { start: date(2024, 3, 10), end: date(2024, 3, 16) });

        let prev = DateRange::for_period(PeriodType::Week, -1, date(2024, 3, 13)).unwrap();
        assert_eq!(prev, DateRange { start: date(2024, 3, 3), end: date(2024, 3, 9) });

        // sunday maps to itself
        let sunday = DateRange::for_period(PeriodType::Week, 0, date(2024, 3, 10)).unwrap();
        assert_eq!(sunday.start, date(2024, 3, 10));
    }

    #[test]
    fn test_month_and_year_ranges() {
        let feb = DateRange::for_period(PeriodType::Month, -1, date(2024, 3, 31)).unwrap();
        assert_eq!(feb, DateRange { start: date(2024, 2, 1), end: date(2024, 2, 29) });

        let jan = DateRange::for_period(PeriodType::Month, 10, date(2024, 3, 31)).unwrap();
        assert_eq!(jan, DateRange { start: date(2025, 1, 1), end: date(2025, 1, 31) });

        let year = DateRange::for_period(PeriodType::Year, -2, date(2024, 6, 1)).unwrap();
        assert_eq!(year, DateRange { start: date(2022, 1, 1), end: date(2022, 12, 31) });
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(period_label(PeriodType::Year, date(2024, 5, 2)).as_deref(), Some("2024"));
        assert_eq!(period_label(PeriodType::Month, date(2024, 5, 2)).as_deref(), Some("May 2024"));
        assert_eq!(
            period_label(PeriodType::Week, date(2024, 5, 2)).as_deref(),
            Some("April 28 - May 4, 2024")
        );
        assert_eq!(period_label(PeriodType::Week, NaiveDate::MIN), None);
    }

    #[test]
    fn test_week_at_calendar_floor_is_an_error() {
        let err = DateRange::for_period(PeriodType::Week, 0, NaiveDate::MIN).unwrap_err();
        assert!(matches!(err, DebtError::InvalidDate { .. }));
    }

    #[test]
    fn test_report_breakdown_and_budget() {
        let today = date(2024, 3, 20);
        let transactions = vec![
            expense(date(2024, 3, 2), 300, Some("Groceries")),
            expense(date(2024, 3, 9), -120, Some("Groceries")),
            expense(date(2024, 3, 11), 900, Some("Rent")),
            expense(date(2024, 3, 12), 45, None),
            expense(date(2024, 2, 28), 999, Some("Rent")),
            Transaction {
                date: date(2024, 3, 15),
                amount: Money::from_major(2_000),
                kind: TransactionKind::Income,
                category: Some("Salary".to_string()),
            },
        ];
        let goals = vec![
            goal("Groceries", PeriodType::Month, 400),
            goal("Textbooks", PeriodType::Month, 150),
            goal("Coffee", PeriodType::Week, 20),
        ];

        let report = DashboardReport::build(PeriodType::Month, 0, today, &transactions, &goals).unwrap();

        assert_eq!(
            report.expense_breakdown,
            vec![
                ExpenseSlice { category: "Rent".to_string(), amount: Money::from_major(900) },
                ExpenseSlice { category: "Groceries".to_string(), amount: Money::from_major(420) },
                ExpenseSlice { category: "Uncategorized".to_string(), amount: Money::from_major(45) },
            ]
        );

        let rows: Vec<(&str, Money, Money)> = report
            .budget_data
            .iter()
            .map(|r| (r.category.as_str(), r.budget, r.spent))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Rent", Money::ZERO, Money::from_major(900)),
                ("Groceries", Money::from_major(400), Money::from_major(420)),
                ("Uncategorized", Money::ZERO, Money::from_major(45)),
                ("Textbooks", Money::from_major(150), Money::ZERO),
            ]
        );
        assert!(report.budget_data[1].is_over_budget());
        assert_eq!(
            report.budget_data[1].utilization(),
            Some(Rate::from_decimal(rust_decimal_macros::dec!(1.05)))
        );
        assert_eq!(report.budget_data[0].utilization(), None);
        assert_eq!(report.budget_data[1].remaining(), Money::from_major(-20));
        assert_eq!(report.budget_data[3].remaining(), Money::from_major(150));

        let json = serde_json::to_value(&report.expense_breakdown[0]).unwrap();
        assert_eq!(json["category"], "Rent");

        assert_eq!(report.totals.expenses, Money::from_major(1_365));
        assert_eq!(report.totals.income, Money::from_major(2_000));
        assert_eq!(report.totals.net, Money::from_major(635));
        assert_eq!(report.earliest_transaction_date, Some(date(2024, 2, 28)));
        assert_eq!(report.earliest_period_label.as_deref(), Some("February 2024"));
    }

    #[test]
    fn test_empty_report() {
        let report = DashboardReport::build(PeriodType::Week, 0, date(2024, 3, 20), &[], &[]).unwrap();
        assert!(report.expense_breakdown.is_empty());
        assert!(report.budget_data.is_empty());
        assert_eq!(report.totals, Totals::default());
        assert_eq!(report.earliest_period_label, None);
    }
}
