//! Value normalization: locale-formatted amounts and ISO dates.

use chrono::NaiveDate;

use crate::error::ParseError;

/// A loosely typed field as it arrives from statement text, config or user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Number(f64),
    Date(NaiveDate),
}

impl RawValue<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            RawValue::Text(_) => "text",
            RawValue::Number(_) => "number",
            RawValue::Date(_) => "date",
        }
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(s: &'a str) -> Self {
        RawValue::Text(s)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(s: &'a String) -> Self {
        RawValue::Text(s.as_str())
    }
}

impl From<f64> for RawValue<'_> {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(n: i64) -> Self {
        RawValue::Number(n as f64)
    }
}

impl From<NaiveDate> for RawValue<'_> {
    fn from(d: NaiveDate) -> Self {
        RawValue::Date(d)
    }
}

/// Parse an amount written with a decimal comma (`296,55`, `1.727,00`).
///
/// Numbers pass through unchanged. When the text has a comma, every `.` is a
/// thousands separator and is dropped before the comma becomes the decimal point.
pub fn to_amount<'a>(value: impl Into<RawValue<'a>>) -> Result<f64, ParseError> {
    let text = match value.into() {
        RawValue::Number(n) => return Ok(n),
        RawValue::Text(s) => s.trim(),
        other => {
            return Err(ParseError::UnsupportedInputType {
                expected: "number or text",
                got: other.type_name(),
            });
        }
    };

    let normalized = if text.contains(',') {
        text.replace('.', "").replacen(',', ".", 1)
    } else {
        text.to_string()
    };

    // `f64::from_str` accepts "inf"/"NaN"; statement amounts are digits only
    if !normalized.bytes().any(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidAmount(text.to_string()));
    }

    normalized
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseError::InvalidAmount(text.to_string()))
}

/// Resolve a date from a `NaiveDate` (returned unchanged) or strict `YYYY-MM-DD` text.
pub fn to_date<'a>(value: impl Into<RawValue<'a>>) -> Result<NaiveDate, ParseError> {
    let text = match value.into() {
        RawValue::Date(d) => return Ok(d),
        RawValue::Text(s) => s,
        other => {
            return Err(ParseError::UnsupportedInputType {
                expected: "date or text",
                got: other.type_name(),
            });
        }
    };

    if !is_iso_date_shape(text) {
        return Err(ParseError::InvalidDateFormat(text.to_string()));
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ParseError::InvalidDateFormat(text.to_string()))
}

// \d{4}-\d{2}-\d{2}, nothing more
fn is_iso_date_shape(text: &str) -> bool {
    let b = text.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}
