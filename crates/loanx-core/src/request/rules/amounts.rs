//! Amount extraction for loan requests (US number conventions).

use std::str::FromStr;

use rust_decimal::Decimal;

use super::patterns::{
    ANNUAL_INCOME, LOAN_AMOUNT_CURRENCY_WORD, LOAN_AMOUNT_INTENT, LOAN_AMOUNT_KEYWORD,
    MONTHLY_CASHFLOW, TOTAL_DEBT,
};
use super::{first_match, ExtractionMatch, FieldExtractor, Rule};

/// Sign constraint applied after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Strictly greater than zero.
    Positive,
    /// Zero or more.
    NonNegative,
    /// Any value.
    Any,
}

impl Sign {
    pub fn admits(&self, value: Decimal) -> bool {
        match self {
            Sign::Positive => value > Decimal::ZERO,
            Sign::NonNegative => value >= Decimal::ZERO,
            Sign::Any => true,
        }
    }
}

/// Amount field extractor: a fallback chain plus a sign constraint.
pub struct AmountExtractor {
    rules: Vec<Rule>,
    sign: Sign,
}

impl AmountExtractor {
    /// Loan amount: keyword/currency-anchored, then "<n> dollars", then
    /// "need/want/requesting/apply for <n>". Must be positive.
    pub fn loan_amount() -> Self {
        Self {
            rules: vec![
                Rule::new("keyword", &LOAN_AMOUNT_KEYWORD),
                Rule::new("currency_word", &LOAN_AMOUNT_CURRENCY_WORD),
                Rule::new("intent", &LOAN_AMOUNT_INTENT),
            ],
            sign: Sign::Positive,
        }
    }

    /// Annual income. Must be non-negative.
    pub fn annual_income() -> Self {
        Self {
            rules: vec![Rule::new("keyword", &ANNUAL_INCOME)],
            sign: Sign::NonNegative,
        }
    }

    /// Total debt. Must be non-negative.
    pub fn total_debt() -> Self {
        Self {
            rules: vec![Rule::new("keyword", &TOTAL_DEBT)],
            sign: Sign::NonNegative,
        }
    }

    /// Monthly cashflow. Sign is kept as written.
    pub fn monthly_cashflow() -> Self {
        Self {
            rules: vec![Rule::new("keyword", &MONTHLY_CASHFLOW)],
            sign: Sign::Any,
        }
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        first_match(text, &self.rules, |caps| {
            parse_us_amount(&caps[1]).filter(|v| self.sign.admits(*v))
        })
    }
}

/// Extract the requested loan amount from text.
pub fn extract_loan_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::loan_amount().extract(text).map(|m| m.value)
}

/// Extract annual income from text.
pub fn extract_annual_income(text: &str) -> Option<Decimal> {
    AmountExtractor::annual_income().extract(text).map(|m| m.value)
}

/// Extract total debt from text.
pub fn extract_total_debt(text: &str) -> Option<Decimal> {
    AmountExtractor::total_debt().extract(text).map(|m| m.value)
}

/// Extract monthly cashflow from text.
pub fn extract_monthly_cashflow(text: &str) -> Option<Decimal> {
    AmountExtractor::monthly_cashflow().extract(text).map(|m| m.value)
}

/// Parse a US-formatted amount (e.g., "45,000", "$1,234.50", "-$300").
///
/// Thousands commas and the dollar sign are dropped. A minus sign before or
/// right after the dollar sign makes the value negative.
pub fn parse_us_amount(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    let negative = trimmed.starts_with('-') || trimmed.starts_with("$-");

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

/// Format amount in US style (1,234.5), at most three fraction digits.
pub fn format_us_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(3).normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let s = rounded.abs().to_string();
    let (integer_part, fraction) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s.as_str(), None),
    };

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    if rounded.is_sign_negative() {
        formatted.push('-');
    }
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }

    formatted
}
