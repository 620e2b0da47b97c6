//! Canonical output record shared by every statement extractor.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::transform::{to_amount, to_date};

/// "current/total" installment marker, e.g. `Parcela 7/7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub current: u32,
    pub total: u32,
}

impl FromStr for Installment {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::InvalidInstallment(s.to_string());
        let (current, total) = s.trim().split_once('/').ok_or_else(bad)?;
        Ok(Installment {
            current: current.trim().parse().map_err(|_| bad())?,
            total: total.trim().parse().map_err(|_| bad())?,
        })
    }
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

/// One parsed transaction line.
///
/// Both installment numbers live in a single `Option<Installment>`, so a
/// record can never carry one without the other. `current <= total` is not
/// checked here; that belongs to [`crate::Expense`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetaryValue {
    pub purchased_at: NaiveDate,
    pub name: String,
    /// Non-negative, in the statement currency.
    pub amount: f64,
    pub installment: Option<Installment>,
}

impl MonetaryValue {
    /// Build a record from already-typed parts. Rejects negative or non-finite amounts.
    pub fn new(
        purchased_at: NaiveDate,
        name: impl Into<String>,
        amount: f64,
        installment: Option<Installment>,
    ) -> Result<Self, ParseError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ParseError::InvalidAmount(amount.to_string()));
        }
        Ok(Self {
            purchased_at,
            name: name.into().trim().to_string(),
            amount,
            installment,
        })
    }

    /// Build a record from raw statement fragments.
    ///
    /// `iso_date` must already be `YYYY-MM-DD` (see [`crate::normalize_date`]),
    /// `amount` uses a decimal comma and `installment` is the optional `N/M` text.
    pub fn from_raw(
        iso_date: &str,
        name: &str,
        amount: &str,
        installment: Option<&str>,
    ) -> Result<Self, ParseError> {
        let purchased_at = to_date(iso_date)?;
        let amount = to_amount(amount)?;
        let installment = installment.map(str::parse::<Installment>).transpose()?;
        Self::new(purchased_at, name, amount, installment)
    }

    pub fn installment_of(&self) -> Option<u32> {
        self.installment.map(|i| i.current)
    }

    pub fn installment_to(&self) -> Option<u32> {
        self.installment.map(|i| i.total)
    }
}
