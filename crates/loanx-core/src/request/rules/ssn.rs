//! SSN (US Social Security Number) extraction and normalization.

use super::patterns::{SSN_DELIMITED, SSN_KEYWORD, SSN_PLAIN};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// SSN field extractor.
///
/// Rules, in order: keyword-anchored, 3-2-4 delimited group, bare 9-digit run.
pub struct SsnExtractor {
    rules: [Rule; 3],
}

impl SsnExtractor {
    /// Create a new SSN extractor.
    pub fn new() -> Self {
        Self {
            rules: [
                Rule::new("keyword", &SSN_KEYWORD),
                Rule::new("delimited", &SSN_DELIMITED),
                Rule::new("plain", &SSN_PLAIN),
            ],
        }
    }
}

impl Default for SsnExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SsnExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(text, &self.rules, |caps| normalize_ssn(&caps[1]))
    }
}

/// Extract an SSN from text.
pub fn extract_ssn(text: &str) -> Option<String> {
    SsnExtractor::new().extract(text).map(|m| m.value)
}

/// Strip everything but digits and re-group as `DDD-DD-DDDD`.
///
/// Returns `None` unless exactly nine digits remain.
pub fn normalize_ssn(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 9 {
        return None;
    }

    Some(format_ssn(&digits))
}

/// Format SSN with dashes (XXX-XX-XXXX).
pub fn format_ssn(ssn: &str) -> String {
    let digits: String = ssn.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 9 {
        return ssn.to_string();
    }

    format!("{}-{}-{}", &digits[0..3], &digits[3..5], &digits[5..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ssn() {
        assert_eq!(normalize_ssn("123456789").as_deref(), Some("123-45-6789"));
        assert_eq!(normalize_ssn("123 45 6789").as_deref(), Some("123-45-6789"));
        assert_eq!(normalize_ssn("12345678"), None);
        assert_eq!(normalize_ssn("1234567890"), None);
    }

    #[test]
    fn test_extract_ssn_keyword() {
        let m = SsnExtractor::new().extract("ssn 123-45-6789").unwrap();
        assert_eq!(m.value, "123-45-6789");
        assert_eq!(m.rule, "keyword");
    }

    #[test]
    fn test_extract_ssn_social_security_number() {
        let text = "My social security number is 987 65 4321, thanks";
        assert_eq!(extract_ssn(text).as_deref(), Some("987-65-4321"));
    }

    #[test]
    fn test_extract_ssn_delimited_without_keyword() {
        let m = SsnExtractor::new().extract("call 123-45-6789 please").unwrap();
        assert_eq!(m.value, "123-45-6789");
        assert_eq!(m.rule, "delimited");
    }

    #[test]
    fn test_extract_ssn_bare_digits() {
        assert_eq!(extract_ssn("my id is 123456789").as_deref(), Some("123-45-6789"));

        let m = SsnExtractor::new().extract("reference 555443333 attached").unwrap();
        assert_eq!(m.rule, "plain");
        assert_eq!(m.value, "555-44-3333");
    }

    #[test]
    fn test_wrong_digit_count_is_not_found() {
        assert_eq!(extract_ssn("ssn 12345678"), None);
        assert_eq!(extract_ssn("ssn 1234567890"), None);
    }

    #[test]
    fn test_rejected_keyword_match_falls_through() {
        // The labeled token is too short; the delimited group later on wins.
        let m = SsnExtractor::new()
            .extract("id 4417, ssn on file is 321-54-9876")
            .unwrap();
        assert_eq!(m.value, "321-54-9876");
        assert_eq!(m.rule, "delimited");
    }

    #[test]
    fn test_format_ssn() {
        assert_eq!(format_ssn("123456789"), "123-45-6789");
        assert_eq!(format_ssn("12345"), "12345");
    }
}
