//! Regex patterns for loan request extraction.
//!
//! Every pattern is case-insensitive where it contains words and captures the
//! field value in group 1 (the full-name pattern also uses group 2).

use lazy_static::lazy_static;
use regex::Regex;

/// US-style amount: digits with optional thousands commas and a fraction.
const AMOUNT: &str = r"[0-9][0-9,]*(?:\.[0-9]+)?";

fn amount_pattern(template: &str) -> Regex {
    Regex::new(&template.replace("{AMOUNT}", AMOUNT)).unwrap()
}

lazy_static! {
    // SSN patterns, most specific first
    pub static ref SSN_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:ssn|social\s*security(?:\s*number)?|ss\s*number|id)\b(?:\s+is\b)?[\s:=#]*([0-9]{3}[\s-]?[0-9]{2}[\s-]?[0-9]{4}|[0-9]+)\b"
    ).unwrap();

    pub static ref SSN_DELIMITED: Regex = Regex::new(
        r"\b([0-9]{3}[\s-][0-9]{2}[\s-][0-9]{4})\b"
    ).unwrap();

    pub static ref SSN_PLAIN: Regex = Regex::new(
        r"\b([0-9]{9})\b"
    ).unwrap();

    // Name patterns
    pub static ref FULL_NAME: Regex = Regex::new(
        r"(?i)\b(?:name|i'm|im|i\s*am)\b(?:\s+is\b)?[\s:=]*([a-z]+)\s+([a-z]+)"
    ).unwrap();

    pub static ref FIRST_NAME: Regex = Regex::new(
        r"(?i)\b(?:first\s*name|fname|my\s*name\s*is)\b(?:\s+is\b)?[\s:=]*([a-z]+)"
    ).unwrap();

    pub static ref LAST_NAME: Regex = Regex::new(
        r"(?i)\b(?:last\s*name|lname|surname)\b(?:\s+is\b)?[\s:=]*([a-z]+)"
    ).unwrap();

    // Loan amount patterns
    pub static ref LOAN_AMOUNT_KEYWORD: Regex = amount_pattern(
        r"(?i)(?:\$|\busd\b|\bamount\b|\bloan\b)(?:\s+(?:of|is)\b)?[\s:=]*\$?({AMOUNT})"
    );

    pub static ref LOAN_AMOUNT_CURRENCY_WORD: Regex = amount_pattern(
        r"(?i)({AMOUNT})\s*(?:dollars?|usd)\b"
    );

    pub static ref LOAN_AMOUNT_INTENT: Regex = amount_pattern(
        r"(?i)\b(?:need|want|requesting|apply\s+for)\s+\$?({AMOUNT})"
    );

    // Purpose runs until punctuation, "my", "i " or the end of the text
    pub static ref LOAN_PURPOSE: Regex = Regex::new(
        r"(?i)\b(?:for|purpose|reason)\b(?:\s+is\b)?[\s:=]*([a-z\s]+?)(?:[.,;!?]|\bmy\b|\bi\s|$)"
    ).unwrap();

    // Financial profile
    pub static ref ANNUAL_INCOME: Regex = amount_pattern(
        r"(?i)\b(?:income|earn(?:s|ing)?|salary|makes?|making)\b(?:\s+(?:is|of)\b)?[\s:=]*\$?({AMOUNT})"
    );

    pub static ref TOTAL_DEBT: Regex = amount_pattern(
        r"(?i)\b(?:debts?|owe|owing)\b(?:\s+(?:is|of)\b)?[\s:=]*\$?({AMOUNT})"
    );

    pub static ref MONTHLY_CASHFLOW: Regex = amount_pattern(
        r"(?i)\b(?:cash\s*flow|monthly)\b(?:\s+(?:is|of)\b)?[\s:=]*(-?\$?-?{AMOUNT})"
    );

    pub static ref APPLICANT_AGE: Regex = Regex::new(
        r"(?i)\b(?:age|i\s*am|i'm)\b(?:\s+is\b)?[\s:=]*([0-9]{1,3})(?:\s*(?:years?|yrs?|yo)\b|\b)"
    ).unwrap();
}
