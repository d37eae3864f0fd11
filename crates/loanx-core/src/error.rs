//! Error types for the loanx-core library.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main error type for the loanx library.
#[derive(Error, Debug)]
pub enum LoanxError {
    /// Required loan request fields could not be extracted.
    #[error("extraction error: {0}")]
    Extraction(#[from] ValidationFailure),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the loanx library.
pub type Result<T> = std::result::Result<T, LoanxError>;

/// A field that must be present before a record can be built.
///
/// Variants are declared in reporting order: SSN is always listed before the
/// loan amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RequiredField {
    Ssn,
    LoanAmount,
}

impl RequiredField {
    /// All required fields in reporting order.
    pub const ALL: [RequiredField; 2] = [RequiredField::Ssn, RequiredField::LoanAmount];

    /// Record key of the field.
    pub fn identifier(&self) -> &'static str {
        match self {
            RequiredField::Ssn => "ssn",
            RequiredField::LoanAmount => "loanAmount",
        }
    }

    /// Label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Ssn => "SSN",
            RequiredField::LoanAmount => "loan amount",
        }
    }

    /// Example value shown when asking the user to supply the field.
    pub fn example(&self) -> &'static str {
        match self {
            RequiredField::Ssn => "123-45-6789",
            RequiredField::LoanAmount => "$50,000",
        }
    }

    /// Label plus example, e.g. `SSN (e.g., 123-45-6789)`.
    pub fn describe(&self) -> String {
        format!("{} (e.g., {})", self.label(), self.example())
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Returned instead of a record when required fields are missing.
///
/// Malformed matches (an SSN with the wrong digit count, a negative loan
/// amount) never show up here; they count as not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    missing: Vec<RequiredField>,
}

impl ValidationFailure {
    /// Build a failure from the missing fields, in any order.
    ///
    /// Returns `None` when nothing is missing.
    pub fn from_missing(fields: impl IntoIterator<Item = RequiredField>) -> Option<Self> {
        let failure = Self::new(fields);
        (!failure.missing.is_empty()).then_some(failure)
    }

    /// Callers guarantee at least one field is missing.
    pub(crate) fn new(fields: impl IntoIterator<Item = RequiredField>) -> Self {
        let mut missing: Vec<RequiredField> = fields.into_iter().collect();
        missing.sort();
        missing.dedup();
        Self { missing }
    }

    /// Missing fields in reporting order.
    pub fn missing(&self) -> &[RequiredField] {
        &self.missing
    }

    /// Whether `field` is among the missing fields.
    pub fn is_missing(&self, field: RequiredField) -> bool {
        self.missing.contains(&field)
    }

    /// Human-readable descriptor for each missing field.
    pub fn descriptors(&self) -> Vec<String> {
        self.missing.iter().map(RequiredField::describe).collect()
    }

    /// Descriptors joined with "and".
    pub fn joined(&self) -> String {
        self.descriptors().join(" and ")
    }

    /// Re-prompt text for the user.
    pub fn prompt(&self) -> String {
        format!("Please include: \"{}\" in your message.", self.joined())
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing required information: {}.", self.joined())
    }
}

impl std::error::Error for ValidationFailure {}

/// Serializable view of a single missing field.
#[derive(Debug, Clone, Serialize)]
pub struct MissingFieldView {
    pub field: &'static str,
    pub label: &'static str,
    pub example: &'static str,
    pub description: String,
}

/// Serializable view of a [`ValidationFailure`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailureView {
    pub missing: Vec<MissingFieldView>,
    pub message: String,
    pub prompt: String,
}

impl From<&ValidationFailure> for ValidationFailureView {
    fn from(failure: &ValidationFailure) -> Self {
        Self {
            missing: failure
                .missing()
                .iter()
                .map(|f| MissingFieldView {
                    field: f.identifier(),
                    label: f.label(),
                    example: f.example(),
                    description: f.describe(),
                })
                .collect(),
            message: failure.to_string(),
            prompt: failure.prompt(),
        }
    }
}

impl Serialize for ValidationFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ValidationFailureView::from(self).serialize(serializer)
    }
}
