//! Nubank credit card statement parser (text)
//!
//! Each transaction spans four extracted lines:
//!   31 JUL
//!   (blank)
//!   Antecipada - Mercadolivre*Mercadol - 7/7
//!   296,55

use regex::Regex;

use super::{build_value, resolve_year};
use crate::Bank;
use crate::error::Result;
use crate::extractor::{Extraction, StatementExtractor};

// DATE \n (blank) \n DESCRIPTION \n VALUE
//
// The value must fill its own line, so a row missing it cannot borrow the
// next row's date digits.
const ROW_PATTERN: &str = concat!(
    r"(?P<date>\d{2} \w{3})\s*\n\s*\n",
    r"(?P<desc>[^\n]+)\s*\n",
    r"(?P<amount>\d[\d.]*,\d{2})[^\S\n]*(?:\n|$)"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NubankExtractor {
    start_page: usize,
    statement_year: Option<i32>,
}

impl NubankExtractor {
    pub fn new() -> Self {
        Self {
            start_page: Bank::Nubank.default_start_page(),
            statement_year: None,
        }
    }

    pub fn with_start_page(mut self, start_page: usize) -> Self {
        self.start_page = start_page;
        self
    }

    /// Year attached to every `DD MON` row. Defaults to the current year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.statement_year = Some(year);
        self
    }
}

impl Default for NubankExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `"Name - N/M"` into the name and the installment text.
///
/// Only the segment after the last `-` can be an installment, so hyphens inside
/// the name survive (`"Antecipada - Loja - 7/7"` keeps `"Antecipada - Loja"`).
/// A last segment that is not `N/M` means there is no installment at all.
fn split_installment(desc: &str) -> (&str, Option<&str>) {
    match desc.rsplit_once('-') {
        Some((name, tail)) if looks_like_installment(tail) => (name.trim(), Some(tail.trim())),
        _ => (desc.trim(), None),
    }
}

fn looks_like_installment(s: &str) -> bool {
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    s.trim()
        .split_once('/')
        .is_some_and(|(a, b)| digits(a.trim()) && digits(b.trim()))
}

impl StatementExtractor for NubankExtractor {
    fn bank(&self) -> Bank {
        Bank::Nubank
    }

    fn start_page(&self) -> usize {
        self.start_page
    }

    fn build_records(&self, page_text: &str) -> Result<Extraction> {
        let row_re = Regex::new(ROW_PATTERN)?;
        let year = resolve_year(self.statement_year);

        let mut out = Extraction::default();
        for caps in row_re.captures_iter(page_text) {
            let (name, installment) = split_installment(&caps["desc"]);
            let value = build_value(&caps["date"], year, name, &caps["amount"], installment);
            out.push(&caps[0], value);
        }

        Ok(out)
    }
}
