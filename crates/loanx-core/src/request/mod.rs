//! Loan request field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, FieldTrace, LoanRequestParser};

use std::path::Path;

use tracing::debug;

use crate::error::ValidationFailure;
use crate::models::request::ExtractedRecord;

/// Trait for loan request extractors.
pub trait RequestExtractor {
    /// Extract a validated record from free text.
    fn extract(&self, text: &str) -> Result<ExtractedRecord, ValidationFailure>;

    /// Read a text file and extract a record from its contents.
    fn extract_from_file(&self, path: &Path) -> crate::Result<ExtractedRecord> {
        let text = std::fs::read_to_string(path)?;
        debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(self.extract(&text)?)
    }
}

/// Extract a loan request from free text with the standard rule set.
pub fn extract(text: &str) -> Result<ExtractedRecord, ValidationFailure> {
    LoanRequestParser::new().extract(text)
}

/// Extract a loan request from a text file with the standard rule set.
pub fn extract_from_file(path: &Path) -> crate::Result<ExtractedRecord> {
    LoanRequestParser::new().extract_from_file(path)
}
