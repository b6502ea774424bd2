use chrono::{Datelike, Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CalculatorConfig, ChartConfig};
use crate::debt::Debt;
use crate::decimal::Money;
use crate::errors::Result;
use crate::history::BalanceHistory;
use crate::interest::{AccrualEngine, InterestCalculator};
use crate::types::{BalancePoint, Payment};

/// sampling step of a chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartCadence {
    Monthly,
    Yearly,
}

impl ChartCadence {
    /// first boundary strictly after `date`
    fn next_boundary(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            ChartCadence::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?
                .checked_add_months(Months::new(1)),
            ChartCadence::Yearly => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
        }
    }
}

/// display-ready balance series: parallel labels, dates and balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub cadence: ChartCadence,
    pub labels: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub data: Vec<Money>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// samples a debt's balance history at fixed calendar boundaries
#[derive(Debug, Clone, Default)]
pub struct ChartGenerator {
    chart: ChartConfig,
    calculator: CalculatorConfig,
}

impl ChartGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(chart: ChartConfig, calculator: CalculatorConfig) -> Self {
        Self { chart, calculator }
    }

    /// monthly while the loan is within the configured span of `today`, yearly after
    pub fn cadence_for(&self, start_date: NaiveDate, today: NaiveDate) -> ChartCadence {
        match start_date.checked_add_months(Months::new(self.chart.monthly_span_months)) {
            Some(limit) if today > limit => ChartCadence::Yearly,
            _ => ChartCadence::Monthly,
        }
    }

    pub fn generate(
        &self,
        debt: &Debt,
        payments: &[Payment],
        time_provider: &SafeTimeProvider,
    ) -> Result<ChartSeries> {
        let today = time_provider.now().date_naive();
        self.generate_as_of(debt, payments, today)
    }

    /// Sample the history at the start date, each calendar boundary before
    /// `today`, and `today` itself. Each sample re-accrues interest from the
    /// closest history point at or before it.
    pub fn generate_as_of(&self, debt: &Debt, payments: &[Payment], today: NaiveDate) -> Result<ChartSeries> {
        let history = BalanceHistory::with_config(self.calculator.clone());
        let points = history.timeline(debt, payments, today)?.points;
        let engine = AccrualEngine::with_config(debt.interest_period, &self.calculator);
        let cadence = self.cadence_for(debt.start_date, today);

        let mut samples = vec![debt.start_date];
        if today > debt.start_date {
            let mut boundary = cadence.next_boundary(debt.start_date);
            while let Some(date) = boundary.filter(|b| *b < today) {
                samples.push(date);
                boundary = cadence.next_boundary(date);
            }
            samples.push(today);
        }

        let mut series = ChartSeries {
            cadence,
            labels: Vec::with_capacity(samples.len()),
            dates: Vec::with_capacity(samples.len()),
            data: Vec::with_capacity(samples.len()),
        };

        for sample in samples {
            let balance = self.balance_at(&points, debt, &engine, sample);
            let format = if sample == today && today > debt.start_date {
                &self.chart.today_label_format
            } else {
                match cadence {
                    ChartCadence::Monthly => &self.chart.month_label_format,
                    ChartCadence::Yearly => &self.chart.year_label_format,
                }
            };
            series.labels.push(sample.format(format).to_string());
            series.dates.push(sample);
            series.data.push(balance);
        }

        debug!(
            debt_id = %debt.id,
            cadence = ?series.cadence,
            samples = series.len(),
            "generated chart series"
        );

        Ok(series)
    }

    fn balance_at(&self, points: &[BalancePoint], debt: &Debt, engine: &AccrualEngine, sample: NaiveDate) -> Money {
        let idx = points.partition_point(|p| p.date <= sample);
        let Some(anchor) = idx.checked_sub(1).and_then(|i| points.get(i)) else {
            return debt.principal.round_dp(self.calculator.balance_dp);
        };

        if sample <= debt.interest_start_date {
            return anchor.balance;
        }

        let accrual_start = anchor.date.max(debt.interest_start_date);
        let accrual = engine.calculate_interest(anchor.balance, debt.interest_rate, accrual_start, sample);
        (anchor.balance + accrual.interest_amount).round_dp(self.calculator.balance_dp)
    }
}

/// chart series for `debt` with the default settings
pub fn generate_chart_series(
    debt: &Debt,
    payments: &[Payment],
    time_provider: &SafeTimeProvider,
) -> Result<ChartSeries> {
    ChartGenerator::new().generate(debt, payments, time_provider)
}
