//! Bank-specific statement layouts.

pub mod c6;
pub mod nubank;

pub use c6::C6Extractor;
pub use nubank::NubankExtractor;

use chrono::{Datelike, Local};
use koala_core::{MonetaryValue, MonthTable, ParseError, normalize_date};

/// Statement rows carry `DD MON` only; without an explicit year the current one is assumed.
///
/// This is wrong for a December statement processed in January.
fn resolve_year(explicit: Option<i32>) -> i32 {
    explicit.unwrap_or_else(|| Local::now().year())
}

/// Build a record from the captured fragments of one statement row.
fn build_value(
    day_month: &str,
    year: i32,
    name: &str,
    amount: &str,
    installment: Option<&str>,
) -> Result<MonetaryValue, ParseError> {
    let iso = normalize_date(&format!("{day_month} {year}"), &MonthTable::PT_BR)?;
    MonetaryValue::from_raw(&iso, name, amount, installment)
}
