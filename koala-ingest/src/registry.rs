//! Explicit bank → extractor mapping handed to whoever drives an import.

use std::collections::BTreeMap;

use tracing::warn;

use crate::Bank;
use crate::error::{ExtractError, Result};
use crate::extractor::StatementExtractor;
use crate::parsers::{C6Extractor, NubankExtractor};

#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: BTreeMap<Bank, Box<dyn StatementExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// C6 and Nubank with their default start pages.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(Box::new(C6Extractor::new()));
        registry.add(Box::new(NubankExtractor::new()));
        registry
    }

    /// Register an extractor under its bank. Returns `false` if that bank is taken.
    pub fn add(&mut self, extractor: Box<dyn StatementExtractor>) -> bool {
        let bank = extractor.bank();
        if self.extractors.contains_key(&bank) {
            warn!(%bank, "could not add extractor because it already exists");
            return false;
        }
        self.extractors.insert(bank, extractor);
        true
    }

    /// Register or overwrite.
    pub fn replace(&mut self, extractor: Box<dyn StatementExtractor>) {
        self.extractors.insert(extractor.bank(), extractor);
    }

    pub fn get(&self, bank: Bank) -> Result<&dyn StatementExtractor> {
        self.extractors
            .get(&bank)
            .map(|e| e.as_ref())
            .ok_or(ExtractError::UnknownExtractor(bank))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bank, &dyn StatementExtractor)> {
        self.extractors.iter().map(|(bank, e)| (*bank, e.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}
