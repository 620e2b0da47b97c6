//! Shared extraction skeleton.
//!
//! A bank layout is a [`StatementExtractor`] strategy: it knows where its
//! transaction tables start and how to turn one page of text into records.
//! [`extract`] is the common algorithm: read pages from the configured start
//! page, run the strategy on each one, concatenate in page order.

use koala_core::{MonetaryValue, ParseError};
use tracing::{debug, info, warn};

use crate::Bank;
use crate::error::{ExtractError, Result};
use crate::pdf::{PageSource, pages};

/// A statement line that matched a layout pattern but could not become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// The full text of the match.
    pub raw: String,
    pub error: ParseError,
}

/// Records plus the lines that were skipped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<MonetaryValue>,
    pub skipped: Vec<SkippedRecord>,
}

impl Extraction {
    /// Keep a record, or log and remember why a matched line was dropped.
    pub fn push(&mut self, raw: &str, result: std::result::Result<MonetaryValue, ParseError>) {
        match result {
            Ok(value) => self.records.push(value),
            Err(error) => {
                warn!(raw = %raw.trim(), %error, "could not process an item, skipping");
                self.skipped.push(SkippedRecord {
                    raw: raw.to_string(),
                    error,
                });
            }
        }
    }

    pub fn append(&mut self, mut other: Extraction) {
        self.records.append(&mut other.records);
        self.skipped.append(&mut other.skipped);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub trait StatementExtractor {
    fn bank(&self) -> Bank;

    /// Zero-based index of the first page holding transactions.
    fn start_page(&self) -> usize;

    /// Parse one page. Per-line failures go to [`Extraction::skipped`] and never
    /// fail the call.
    fn build_records(&self, _page_text: &str) -> Result<Extraction> {
        Err(ExtractError::NotImplemented(self.bank().name()))
    }
}

/// Run `extractor` over `source`, starting at the extractor's configured page.
pub fn extract<S: PageSource + ?Sized>(
    extractor: &dyn StatementExtractor,
    source: &S,
) -> Result<Extraction> {
    extract_from(extractor, source, extractor.start_page())
}

/// Like [`extract`] with an explicit zero-based start page.
pub fn extract_from<S: PageSource + ?Sized>(
    extractor: &dyn StatementExtractor,
    source: &S,
    start_page: usize,
) -> Result<Extraction> {
    let texts = pages(source, start_page)?;
    let out = extract_pages(extractor, &texts)?;

    info!(
        bank = %extractor.bank(),
        pages = texts.len(),
        records = out.records.len(),
        skipped = out.skipped.len(),
        "statement extracted"
    );
    Ok(out)
}

/// Concatenate the per-page results of `extractor` over already-extracted page texts.
pub fn extract_pages(extractor: &dyn StatementExtractor, texts: &[String]) -> Result<Extraction> {
    let mut out = Extraction::default();
    for (i, text) in texts.iter().enumerate() {
        let page = extractor.build_records(text)?;
        debug!(page = i, records = page.records.len(), "page parsed");
        out.append(page);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::TextPages;

    struct Bare;

    impl StatementExtractor for Bare {
        fn bank(&self) -> Bank {
            Bank::C6
        }

        fn start_page(&self) -> usize {
            0
        }
    }

    /// One record per non-empty line, named after the line.
    struct PerLine;

    impl StatementExtractor for PerLine {
        fn bank(&self) -> Bank {
            Bank::Nubank
        }

        fn start_page(&self) -> usize {
            1
        }

        fn build_records(&self, page_text: &str) -> Result<Extraction> {
            let mut out = Extraction::default();
            for line in page_text.lines().filter(|l| !l.trim().is_empty()) {
                out.push(line, MonetaryValue::from_raw("2023-08-01", line, "1,00", None));
            }
            Ok(out)
        }
    }

    #[test]
    fn test_missing_build_records_fails_fast() {
        let source: TextPages = ["page"].into_iter().collect();
        let err = extract(&Bare, &source).unwrap_err();
        assert!(matches!(err, ExtractError::NotImplemented("C6")));
    }

    #[test]
    fn test_concatenates_pages_in_order() {
        let source: TextPages = ["cover", "a\nb", "", "c"].into_iter().collect();
        let out = extract(&PerLine, &source).unwrap();
        let names: Vec<_> = out.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_no_transactions_is_empty_not_error() {
        let source: TextPages = ["cover", "nothing here"].into_iter().collect();
        let out = extract_from(&PerLine, &source, 2).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_page_out_of_range_aborts() {
        let source: TextPages = ["cover"].into_iter().collect();
        let err = extract_from(&PerLine, &source, 5).unwrap_err();
        assert!(matches!(err, ExtractError::PageOutOfRange { .. }));
    }

    #[test]
    fn test_push_records_skips() {
        let mut out = Extraction::default();
        out.push("bad", MonetaryValue::from_raw("2023-13-01", "x", "1,00", None));
        out.push("good", MonetaryValue::from_raw("2023-12-01", "x", "1,00", None));
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].raw, "bad");
        assert!(matches!(out.skipped[0].error, ParseError::InvalidDateFormat(_)));
    }
}
