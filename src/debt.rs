use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{DebtError, Result};
use crate::types::{DebtId, InterestPeriod, Payment};

/// A debt's static terms, as stored by the persistence layer.
///
/// On the wire `interestRate` is an annual percentage (`5.5` for 5.5%) and
/// `interestStartDate` falls back to `startDate` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DebtRecord")]
pub struct Debt {
    pub id: DebtId,
    pub name: String,
    pub principal: Money,
    #[serde(with = "percent")]
    pub interest_rate: Rate,
    pub interest_period: InterestPeriod,
    pub start_date: NaiveDate,
    pub interest_start_date: NaiveDate,
}

/// incoming debt payload, before defaults are filled in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebtRecord {
    #[serde(default = "Uuid::new_v4")]
    id: DebtId,
    name: String,
    principal: Money,
    #[serde(with = "percent")]
    interest_rate: Rate,
    #[serde(default)]
    interest_period: InterestPeriod,
    start_date: NaiveDate,
    #[serde(default)]
    interest_start_date: Option<NaiveDate>,
}

impl From<DebtRecord> for Debt {
    fn from(record: DebtRecord) -> Self {
        Debt {
            id: record.id,
            name: record.name,
            principal: record.principal,
            interest_rate: record.interest_rate,
            interest_period: record.interest_period,
            start_date: record.start_date,
            interest_start_date: record.interest_start_date.unwrap_or(record.start_date),
        }
    }
}

/// (de)serialize a `Rate` as a percentage number
pub(crate) mod percent {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::decimal::Rate;

    pub fn serialize<S: Serializer>(rate: &Rate, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&rate.as_percentage().normalize(), serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rate, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(Rate::from_percentage)
    }
}

impl Debt {
    pub fn builder() -> DebtBuilder {
        DebtBuilder::new()
    }

    /// true when interest only begins accruing after the loan start
    pub fn has_deferred_interest(&self) -> bool {
        self.interest_start_date > self.start_date
    }

    /// check the terms the way the intake layer does before a debt is stored
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DebtError::EmptyName);
        }
        if self.principal.is_negative() {
            return Err(DebtError::InvalidPrincipal {
                amount: self.principal,
            });
        }
        if self.interest_rate.is_negative() {
            return Err(DebtError::InvalidInterestRate {
                rate: self.interest_rate,
            });
        }
        if self.interest_start_date < self.start_date {
            return Err(DebtError::InvalidDateRange {
                start_date: self.start_date,
                interest_start_date: self.interest_start_date,
            });
        }
        Ok(())
    }

    /// check a payment can be applied to this debt
    pub fn validate_payment(&self, payment: &Payment) -> Result<()> {
        if !payment.amount.is_positive() {
            return Err(DebtError::InvalidPaymentAmount {
                amount: payment.amount,
            });
        }
        if payment.date < self.start_date {
            return Err(DebtError::PaymentBeforeStart {
                payment_date: payment.date,
                start_date: self.start_date,
            });
        }
        Ok(())
    }

    pub fn validate_payments(&self, payments: &[Payment]) -> Result<()> {
        payments.iter().try_for_each(|p| self.validate_payment(p))
    }
}

/// builder for debts
#[derive(Debug, Default)]
pub struct DebtBuilder {
    id: Option<DebtId>,
    name: Option<String>,
    principal: Option<Money>,
    rate: Option<Rate>,
    interest_period: Option<InterestPeriod>,
    start_date: Option<NaiveDate>,
    interest_start_date: Option<NaiveDate>,
}

impl DebtBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: DebtId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// annual rate as a percentage, e.g. 5.5 for 5.5%
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.rate = Some(Rate::from_percentage(percent));
        self
    }

    pub fn interest_period(mut self, period: InterestPeriod) -> Self {
        self.interest_period = Some(period);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn interest_start_date(mut self, date: NaiveDate) -> Self {
        self.interest_start_date = Some(date);
        self
    }

    pub fn build(self) -> Result<Debt> {
        let name = self.name.ok_or(DebtError::MissingField { field: "name" })?;
        let principal = self
            .principal
            .ok_or(DebtError::MissingField { field: "principal" })?;
        let start_date = self
            .start_date
            .ok_or(DebtError::MissingField { field: "start_date" })?;

        let debt = Debt {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: name.trim().to_string(),
            principal,
            interest_rate: self.rate.unwrap_or(Rate::ZERO),
            interest_period: self.interest_period.unwrap_or_default(),
            start_date,
            interest_start_date: self.interest_start_date.unwrap_or(start_date),
        };
        debt.validate()?;
        Ok(debt)
    }
}
