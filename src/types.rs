use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::DebtError;

/// unique identifier for a debt
pub type DebtId = Uuid;

/// unique identifier for a user owning debts, categories and goals
pub type UserId = Uuid;

/// compounding frequency basis used to convert the annual rate into a periodic one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterestPeriod {
    Daily,
    #[default]
    Monthly,
    Annually,
}

impl InterestPeriod {
    /// number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            InterestPeriod::Daily => 365,
            InterestPeriod::Monthly => 12,
            InterestPeriod::Annually => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InterestPeriod::Daily => "daily",
            InterestPeriod::Monthly => "monthly",
            InterestPeriod::Annually => "annually",
        }
    }
}

impl fmt::Display for InterestPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestPeriod {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "daily" => Ok(InterestPeriod::Daily),
            "monthly" => Ok(InterestPeriod::Monthly),
            "annually" => Ok(InterestPeriod::Annually),
            other => Err(DebtError::UnknownInterestPeriod {
                value: other.to_string(),
            }),
        }
    }
}

/// money applied to a debt on a given date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub date: NaiveDate,
    pub amount: Money,
}

impl Payment {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self { date, amount }
    }
}

/// one point of a balance series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Money,
}

impl BalancePoint {
    /// create a point, rounding the balance to cents
    pub fn new(date: NaiveDate, balance: Money) -> Self {
        Self {
            date,
            balance: balance.round_cents(),
        }
    }
}

/// whether a category collects income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
}

impl FromStr for CategoryKind {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(DebtError::UnknownCategoryKind {
                value: other.to_string(),
            }),
        }
    }
}

/// transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// budgeting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Week,
    Month,
    Year,
}

impl FromStr for PeriodType {
    type Err = DebtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "week" => Ok(PeriodType::Week),
            "month" => Ok(PeriodType::Month),
            "year" => Ok(PeriodType::Year),
            other => Err(DebtError::UnknownPeriodType {
                value: other.to_string(),
            }),
        }
    }
}
