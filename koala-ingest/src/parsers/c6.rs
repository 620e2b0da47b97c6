//! C6 Bank credit card statement parser (text)
//!
//! Expected extracted-text section, one transaction per line:
//!   TRANSAÇÕES
//!   DE 10 JUL A 10 AGO
//!   VALORES EM R$
//!   31 JUL Pag*Posto 130,00
//!   31 JUL Mercadolivre*Mercadol - Parcela 7/7 296,55

use regex::Regex;

use super::{build_value, resolve_year};
use crate::Bank;
use crate::error::Result;
use crate::extractor::{Extraction, StatementExtractor};

// DATE DESCRIPTION [- Parcela N/M] VALUE
//
// Description is letters, digits, spaces and `*` only, so rows with a
// thousands separator (`1.727,00`) or other punctuation do not match. A row
// never spans a line break.
const ROW_PATTERN: &str = concat!(
    r"(?P<date>\d{2} \w{3}) ",
    r"(?P<desc>[\w \t*]+)",
    r"(?: - Parcela (?P<inst>\d+/\d+))? ",
    r"(?P<amount>\d+,\d+)"
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct C6Extractor {
    start_page: usize,
    statement_year: Option<i32>,
}

impl C6Extractor {
    pub fn new() -> Self {
        Self {
            start_page: Bank::C6.default_start_page(),
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

impl Default for C6Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementExtractor for C6Extractor {
    fn bank(&self) -> Bank {
        Bank::C6
    }

    fn start_page(&self) -> usize {
        self.start_page
    }

    fn build_records(&self, page_text: &str) -> Result<Extraction> {
        let row_re = Regex::new(ROW_PATTERN)?;
        let year = resolve_year(self.statement_year);

        let mut out = Extraction::default();
        for caps in row_re.captures_iter(page_text) {
            let value = build_value(
                &caps["date"],
                year,
                &caps["desc"],
                &caps["amount"],
                caps.name("inst").map(|m| m.as_str()),
            );
            out.push(&caps[0], value);
        }

        Ok(out)
    }
}
