//! Rule-based field extractors for loan requests.
//!
//! Each field is matched by a fallback chain: an ordered list of [`Rule`]s
//! tried until one both matches and survives normalization.

pub mod age;
pub mod amounts;
pub mod names;
pub mod patterns;
pub mod purpose;
pub mod ssn;

pub use age::{extract_age, AgeExtractor};
pub use amounts::{
    extract_annual_income, extract_loan_amount, extract_monthly_cashflow, extract_total_debt,
    format_us_amount, parse_us_amount, AmountExtractor, Sign,
};
pub use names::{extract_name, ApplicantName, NameExtractor};
pub use purpose::{extract_purpose, PurposeExtractor};
pub use ssn::{extract_ssn, format_ssn, normalize_ssn, SsnExtractor};

use regex::{Captures, Regex};
use tracing::{debug, trace};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// A named pattern in a fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Rule name, reported in traces.
    pub name: &'static str,
    /// Compiled pattern.
    pub pattern: &'static Regex,
}

impl Rule {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self { name, pattern }
    }
}

/// A normalized value with the rule and text that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that matched.
    pub rule: &'static str,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }

    /// Apply `f` to the value, keeping rule and source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractionMatch<U> {
        ExtractionMatch {
            value: f(self.value),
            rule: self.rule,
            position: self.position,
            source: self.source,
        }
    }
}

/// Run a fallback chain against `text`.
///
/// Each rule is evaluated at its leftmost occurrence only. When `normalize`
/// rejects the capture the chain moves on to the next rule.
pub fn first_match<T>(
    text: &str,
    rules: &[Rule],
    normalize: impl Fn(&Captures<'_>) -> Option<T>,
) -> Option<ExtractionMatch<T>> {
    rules.iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        accept(rule, &caps, &normalize)
    })
}

/// Like [`first_match`], but a rejected capture moves on to the rule's next
/// occurrence before the chain moves on to the next rule.
///
/// For rules whose normalizer rejects by vocabulary, where a later occurrence
/// of the same phrasing can still hold a valid value.
pub fn first_valid_match<T>(
    text: &str,
    rules: &[Rule],
    normalize: impl Fn(&Captures<'_>) -> Option<T>,
) -> Option<ExtractionMatch<T>> {
    rules.iter().find_map(|rule| {
        rule.pattern
            .captures_iter(text)
            .find_map(|caps| accept(rule, &caps, &normalize))
    })
}

fn accept<T>(
    rule: &Rule,
    caps: &Captures<'_>,
    normalize: &impl Fn(&Captures<'_>) -> Option<T>,
) -> Option<ExtractionMatch<T>> {
    let whole = caps.get(0)?;

    match normalize(caps) {
        Some(value) => {
            debug!(rule = rule.name, source = whole.as_str(), "rule matched");
            Some(
                ExtractionMatch::new(value, rule.name, whole.as_str())
                    .with_position(whole.start(), whole.end()),
            )
        }
        None => {
            trace!(rule = rule.name, source = whole.as_str(), "match rejected");
            None
        }
    }
}

/// Upper-case the first letter of each token and lower-case the rest.
///
/// Runs of whitespace collapse to a single space.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
