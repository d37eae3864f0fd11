//! Core library for loan request extraction.
//!
//! This crate provides:
//! - Rule-based field extractors for free-text loan requests (SSN, name,
//!   loan amount, purpose, financial profile, age)
//! - Validation of required fields with user-facing re-prompt text
//! - Record and configuration models shared by the CLI and WASM bindings

pub mod error;
pub mod models;
pub mod request;

pub use error::{LoanxError, RequiredField, Result, ValidationFailure};
pub use models::config::{LoanxConfig, OutputFormat};
pub use models::request::{ExtractedRecord, Field};
pub use request::rules::{format_us_amount, normalize_ssn};
pub use request::{
    extract, extract_from_file, ExtractionResult, FieldTrace, LoanRequestParser, RequestExtractor,
};
