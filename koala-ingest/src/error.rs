//! Document-level failures. Unlike `ParseError`, these abort the whole extraction.

use thiserror::Error;

use crate::Bank;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("initial page {start_page} is over the maximum pages of the pdf ({page_count})")]
    PageOutOfRange { start_page: usize, page_count: usize },

    #[error("{0} does not implement build_records")]
    NotImplemented(&'static str),

    #[error("no extractor registered for {0}")]
    UnknownExtractor(Bank),

    #[error("failed to read pdf: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid transaction pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
