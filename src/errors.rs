use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug)]
pub enum DebtError {
    #[error("invalid principal: {amount}")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("payment dated {payment_date} precedes loan start {start_date}")]
    PaymentBeforeStart {
        payment_date: NaiveDate,
        start_date: NaiveDate,
    },

    #[error("interest start {interest_start_date} precedes loan start {start_date}")]
    InvalidDateRange {
        start_date: NaiveDate,
        interest_start_date: NaiveDate,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("unknown interest period: {value} (expected daily, monthly or annually)")]
    UnknownInterestPeriod {
        value: String,
    },

    #[error("unknown category kind: {value} (expected income or expense)")]
    UnknownCategoryKind {
        value: String,
    },

    #[error("unknown period type: {value} (expected week, month or year)")]
    UnknownPeriodType {
        value: String,
    },

    #[error("name must not be empty")]
    EmptyName,

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("category already exists: {name}")]
    CategoryConflict {
        name: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DebtError>;
