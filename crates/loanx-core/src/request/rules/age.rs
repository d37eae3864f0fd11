//! Applicant age extraction.

use super::patterns::APPLICANT_AGE;
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

pub struct AgeExtractor {
    rules: [Rule; 1],
}

impl AgeExtractor {
    pub fn new() -> Self {
        Self {
            rules: [Rule::new("keyword", &APPLICANT_AGE)],
        }
    }
}

impl Default for AgeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AgeExtractor {
    type Output = ExtractionMatch<u32>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(text, &self.rules, |caps| {
            caps[1].parse::<u32>().ok().filter(|&age| age > 0)
        })
    }
}

/// Extract the applicant's age from text.
pub fn extract_age(text: &str) -> Option<u32> {
    AgeExtractor::new().extract(text).map(|m| m.value)
}
