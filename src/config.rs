use serde::{Deserialize, Serialize};

use crate::errors::{DebtError, Result};

/// settings for the balance history calculator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// days in the year used to turn elapsed days into periods
    pub day_basis: u32,
    /// decimal places reported balances are rounded to
    pub balance_dp: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            day_basis: 365,
            balance_dp: 2,
        }
    }
}

impl CalculatorConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.day_basis == 0 {
            return Err(DebtError::InvalidConfiguration {
                message: "day_basis must be positive".to_string(),
            });
        }
        if self.balance_dp > 8 {
            return Err(DebtError::InvalidConfiguration {
                message: format!("balance_dp {} exceeds money precision of 8", self.balance_dp),
            });
        }
        Ok(())
    }
}

/// settings for chart sampling and labelling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// loans younger than this many months are sampled monthly, older ones yearly
    pub monthly_span_months: u32,
    /// chrono format for monthly sample labels
    pub month_label_format: String,
    /// chrono format for yearly sample labels
    pub year_label_format: String,
    /// chrono format for the trailing "today" sample
    pub today_label_format: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            monthly_span_months: 36,
            month_label_format: "%b %y".to_string(),
            year_label_format: "%Y".to_string(),
            today_label_format: "%b %d, %Y".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.monthly_span_months == 0 {
            return Err(DebtError::InvalidConfiguration {
                message: "monthly_span_months must be positive".to_string(),
            });
        }
        let formats = [
            ("month_label_format", &self.month_label_format),
            ("year_label_format", &self.year_label_format),
            ("today_label_format", &self.today_label_format),
        ];
        for (field, format) in formats {
            if format.trim().is_empty() {
                return Err(DebtError::InvalidConfiguration {
                    message: format!("{} must not be empty", field),
                });
            }
        }
        Ok(())
    }
}
