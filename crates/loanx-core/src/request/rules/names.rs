//! Applicant name extraction.

use super::patterns::{FIRST_NAME, FULL_NAME, LAST_NAME};
use super::{first_match, first_valid_match, title_case, ExtractionMatch, FieldExtractor, Rule};

/// Words that follow name keywords in ordinary sentences but are never names
/// ("I am applying for...", "first name Jake last name...").
const NOT_A_NAME: &[&str] = &[
    "a", "am", "an", "and", "applying", "first", "for", "from", "here", "in", "interested",
    "is", "last", "looking", "my", "name", "need", "not", "or", "requesting", "ssn", "the",
    "to", "trying", "want", "with",
];

fn normalize_name(token: &str) -> Option<String> {
    let lower = token.to_lowercase();
    if NOT_A_NAME.contains(&lower.as_str()) {
        return None;
    }
    Some(title_case(token))
}

/// First and last name as found in the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantName {
    pub first: Option<ExtractionMatch<String>>,
    pub last: Option<ExtractionMatch<String>>,
}

/// Name extractor.
///
/// The full-name rule takes precedence: when any occurrence of it yields a
/// valid name, the separate first/last rules are not consulted at all.
pub struct NameExtractor {
    full: [Rule; 1],
    first: [Rule; 1],
    last: [Rule; 1],
}

impl NameExtractor {
    pub fn new() -> Self {
        Self {
            full: [Rule::new("full_name", &FULL_NAME)],
            first: [Rule::new("first_name", &FIRST_NAME)],
            last: [Rule::new("last_name", &LAST_NAME)],
        }
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ApplicantName;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let full = first_valid_match(text, &self.full, |caps| {
            Some((normalize_name(&caps[1])?, normalize_name(&caps[2])?))
        });

        let name = match full {
            Some(m) => {
                let (first, last) = m.value.clone();
                ApplicantName {
                    first: Some(m.clone().map(|_| first)),
                    last: Some(m.map(|_| last)),
                }
            }
            None => ApplicantName {
                first: first_match(text, &self.first, |caps| normalize_name(&caps[1])),
                last: first_match(text, &self.last, |caps| normalize_name(&caps[1])),
            },
        };

        if name.first.is_none() && name.last.is_none() {
            None
        } else {
            Some(name)
        }
    }
}

/// Extract `(first, last)` names from text.
pub fn extract_name(text: &str) -> (Option<String>, Option<String>) {
    match NameExtractor::new().extract(text) {
        Some(name) => (
            name.first.map(|m| m.value),
            name.last.map(|m| m.value),
        ),
        None => (None, None),
    }
}
