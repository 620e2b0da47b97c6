//! Date normalization for statement rows.
//!
//! Statements print dates as `DD MON` with a localized three-letter month
//! (`31 JUL`, `04 AGO`). Extractors append the year and hand the result to
//! [`normalize_date`], which yields canonical `YYYY-MM-DD` text.

use crate::error::ParseError;

/// Fixed mapping from localized three-letter month abbreviations to month numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTable {
    abbrevs: [&'static str; 12],
}

impl MonthTable {
    /// Brazilian Portuguese, as printed by C6 and Nubank.
    pub const PT_BR: MonthTable = MonthTable {
        abbrevs: [
            "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
        ],
    };

    pub const EN: MonthTable = MonthTable {
        abbrevs: [
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ],
    };

    /// Month number (1..=12) for a token, case-insensitive.
    pub fn month_number(&self, token: &str) -> Option<u32> {
        let upper = token.to_uppercase();
        self.abbrevs
            .iter()
            .position(|abbrev| *abbrev == upper)
            .map(|idx| idx as u32 + 1)
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        MonthTable::PT_BR
    }
}

/// Convert `"<day> <MON> <year>"` into `"YYYY-MM-DD"`.
///
/// The input must be exactly three single-space separated tokens: a 1-2 digit
/// day, a 3-letter month and a 4-digit year. Any other shape is
/// [`ParseError::InvalidDateFormat`]; a well-shaped month token missing from
/// `table` is [`ParseError::InvalidMonthToken`]. Day ranges are not checked
/// here; `transform::to_date` rejects impossible dates.
pub fn normalize_date(date_text: &str, table: &MonthTable) -> Result<String, ParseError> {
    let bad_format = || ParseError::InvalidDateFormat(date_text.to_string());

    let parts: Vec<&str> = date_text.split(' ').collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(bad_format());
    };

    let day_ok = (1..=2).contains(&day.len()) && day.bytes().all(|b| b.is_ascii_digit());
    let year_ok = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
    let month_ok = month.chars().count() == 3 && month.chars().all(char::is_alphabetic);
    if !(day_ok && year_ok && month_ok) {
        return Err(bad_format());
    }

    let month_number = table
        .month_number(month)
        .ok_or_else(|| ParseError::InvalidMonthToken(month.to_string()))?;

    Ok(format!("{year}-{month_number:02}-{day:0>2}"))
}
