//! Record-level error taxonomy.
//!
//! Everything here describes one bad line of statement text. Extractors absorb
//! these errors (skip the line, keep going); they never abort a document.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("wrong date format {0:?}: expected `DD MON YYYY` (e.g. 20 JUL 1999) or `YYYY-MM-DD`")]
    InvalidDateFormat(String),

    #[error("not a valid month identifier: {0:?}")]
    InvalidMonthToken(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("unsupported input type: expected {expected}, got {got}")]
    UnsupportedInputType {
        expected: &'static str,
        got: &'static str,
    },

    #[error("invalid installment fragment: {0:?}")]
    InvalidInstallment(String),
}

/// Violations of the expense entity invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseError {
    #[error("you must provide a valid expense name")]
    EmptyName,

    #[error("installment expenses must define installment_of and installment_to")]
    MissingInstallment,

    #[error("installment_of ({current}) is greater than installment_to ({total})")]
    InstallmentOverflow { current: u32, total: u32 },
}
