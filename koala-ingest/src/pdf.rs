//! Page text access.
//!
//! Extractors only need "how many pages" and "text of page N". [`PdfDocument`]
//! answers that from a PDF byte stream via `lopdf`; [`TextPages`] answers it
//! from text that was already extracted elsewhere (pdftotext output, fixtures).

use std::io::Read;

use lopdf::Document;
use tracing::debug;

use crate::error::{ExtractError, Result};

/// A document whose pages can be rendered to plain text.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Plain text of the page at zero-based `index`.
    fn page_text(&self, index: usize) -> Result<String>;
}

/// Text of every page from `start_page` (zero-based) to the end, in order.
///
/// `start_page == page_count` yields no pages; anything past that is
/// [`ExtractError::PageOutOfRange`] rather than a silently empty result.
pub fn pages<S: PageSource + ?Sized>(source: &S, start_page: usize) -> Result<Vec<String>> {
    let page_count = source.page_count();
    if start_page > page_count {
        return Err(ExtractError::PageOutOfRange {
            start_page,
            page_count,
        });
    }

    debug!(start_page, page_count, "reading statement pages");
    (start_page..page_count)
        .map(|index| source.page_text(index))
        .collect()
}

/// A PDF loaded with `lopdf`.
pub struct PdfDocument {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PdfDocument {
    /// Load from any byte stream. The stream is read to the end; the caller keeps ownership.
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let doc = Document::load_from(reader)?;
        Ok(Self::from_document(doc))
    }

    pub fn load_mem(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: Document) -> Self {
        // BTreeMap keys: 1-based page numbers in document order
        let page_numbers = doc.get_pages().into_keys().collect();
        Self { doc, page_numbers }
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_count = self.page_count();
        let number = *self
            .page_numbers
            .get(index)
            .ok_or(ExtractError::PageOutOfRange {
                start_page: index,
                page_count,
            })?;
        Ok(self.doc.extract_text(&[number])?)
    }
}

/// Pre-extracted page texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPages(pub Vec<String>);

impl TextPages {
    /// Split a text dump on form feeds (`\x0c`), the page separator pdftotext emits.
    ///
    /// A trailing form feed does not produce an extra empty page.
    pub fn from_form_feed(text: &str) -> Self {
        let mut pages: Vec<String> = text.split('\x0c').map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        TextPages(pages)
    }
}

impl<S: Into<String>> FromIterator<S> for TextPages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TextPages(iter.into_iter().map(Into::into).collect())
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        self.0
            .get(index)
            .cloned()
            .ok_or(ExtractError::PageOutOfRange {
                start_page: index,
                page_count: self.0.len(),
            })
    }
}
