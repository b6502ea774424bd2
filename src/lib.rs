pub mod cache;
pub mod categories;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod debt;
pub mod decimal;
pub mod errors;
pub mod history;
pub mod interest;
pub mod summary;
pub mod types;

// re-export key types
pub use cache::ReadThroughCache;
pub use categories::{Category, CategoryRegistry};
pub use chart::{generate_chart_series, ChartCadence, ChartGenerator, ChartSeries};
pub use config::{CalculatorConfig, ChartConfig};
pub use dashboard::{BudgetGoal, BudgetRow, DashboardReport, DateRange, ExpenseSlice, Totals, Transaction};
pub use debt::{Debt, DebtBuilder};
pub use decimal::{Money, Rate};
pub use errors::{DebtError, Result};
pub use history::{compute_balance_history, BalanceHistory, BalanceTimeline};
pub use interest::{compute_interest, AccrualEngine, InterestCalculation, InterestCalculator};
pub use summary::PayoffSummary;
pub use types::{
    BalancePoint, CategoryKind, DebtId, InterestPeriod, Payment, PeriodType, TransactionKind, UserId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
