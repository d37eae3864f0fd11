//! Loan purpose extraction.

use super::patterns::LOAN_PURPOSE;
use super::{first_match, title_case, ExtractionMatch, FieldExtractor, Rule};

/// Connective words dropped from the end of a captured purpose.
const TRAILING_CONNECTIVES: &[&str] = &["and", "or", "but", "so", "with", "to"];

/// Purpose extractor. Single rule, no fallback.
pub struct PurposeExtractor {
    rules: [Rule; 1],
}

impl PurposeExtractor {
    pub fn new() -> Self {
        Self {
            rules: [Rule::new("keyword", &LOAN_PURPOSE)],
        }
    }
}

impl Default for PurposeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PurposeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(text, &self.rules, |caps| normalize_purpose(&caps[1]))
    }
}

/// Extract the loan purpose from text.
pub fn extract_purpose(text: &str) -> Option<String> {
    PurposeExtractor::new().extract(text).map(|m| m.value)
}

fn normalize_purpose(raw: &str) -> Option<String> {
    let mut words: Vec<&str> = raw.split_whitespace().collect();

    while let Some(last) = words.last() {
        if TRAILING_CONNECTIVES.contains(&last.to_lowercase().as_str()) {
            words.pop();
        } else {
            break;
        }
    }

    if words.is_empty() {
        return None;
    }

    Some(title_case(&words.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_until_period() {
        assert_eq!(
            extract_purpose("I need $50,000 for home renovation. My ssn is 123-45-6789").as_deref(),
            Some("Home Renovation")
        );
    }

    #[test]
    fn test_purpose_until_connective() {
        assert_eq!(
            extract_purpose("loan for a used car and my income is 60000").as_deref(),
            Some("A Used Car")
        );
        assert_eq!(
            extract_purpose("purpose: debt consolidation i make 40000").as_deref(),
            Some("Debt Consolidation")
        );
    }

    #[test]
    fn test_purpose_at_end_of_text() {
        assert_eq!(
            extract_purpose("reason is   medical BILLS").as_deref(),
            Some("Medical Bills")
        );
    }

    #[test]
    fn test_purpose_skips_amount_after_for() {
        // "for $20,000" cannot be a purpose; the next "for" is used.
        assert_eq!(
            extract_purpose("apply for $20,000 for wedding costs").as_deref(),
            Some("Wedding Costs")
        );
    }

    #[test]
    fn test_no_purpose() {
        assert_eq!(extract_purpose("ssn 123-45-6789, need $10,000"), None);
    }
}
