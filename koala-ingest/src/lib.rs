//! koala-ingest: statement PDF page extraction and bank-specific parsers.

pub mod bank;
pub mod error;
pub mod extractor;
pub mod parsers;
pub mod pdf;
pub mod registry;

pub use bank::Bank;
pub use error::ExtractError;
pub use extractor::{Extraction, SkippedRecord, StatementExtractor, extract, extract_from, extract_pages};
pub use parsers::{C6Extractor, NubankExtractor};
pub use pdf::{PageSource, PdfDocument, TextPages, pages};
pub use registry::ExtractorRegistry;
