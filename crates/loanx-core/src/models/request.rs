//! Loan request data models.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::request::rules::format_us_amount;

/// Default first name when the request does not name the applicant.
pub const DEFAULT_FIRST_NAME: &str = "Applicant";

/// Default last name when the request does not name the applicant.
pub const DEFAULT_LAST_NAME: &str = "User";

/// Default loan purpose.
pub const DEFAULT_LOAN_PURPOSE: &str = "General Purpose";

/// A validated loan request extracted from free text.
///
/// Only the extractor builds these, and only once the SSN and loan amount
/// are known. The serialized form is the loan-application submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct ExtractedRecord {
    /// Social Security Number, `DDD-DD-DDDD`.
    pub ssn: String,

    /// Applicant first name, title-cased.
    pub first_name: String,

    /// Applicant last name, title-cased.
    pub last_name: String,

    /// Requested loan amount (always positive).
    #[serde(with = "rust_decimal::serde::float")]
    pub loan_amount: Decimal,

    /// Purpose of the loan, title-cased.
    pub loan_purpose: String,

    /// Annual income.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub annual_income: Option<Decimal>,

    /// Total outstanding debt.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_debt: Option<Decimal>,

    /// Monthly cashflow; negative for a net outflow.
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_cashflow: Option<Decimal>,

    /// Applicant age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicant_age: Option<u32>,
}

impl ExtractedRecord {
    /// Whether the applicant name came from the text rather than defaults.
    pub fn has_name(&self) -> bool {
        self.first_name != DEFAULT_FIRST_NAME
    }

    /// Short "what was understood" list, e.g. `SSN: 123-45-6789`,
    /// `Amount: $50,000`.
    pub fn highlights(&self) -> Vec<String> {
        let mut out = vec![
            format!("SSN: {}", self.ssn),
            format!("Amount: ${}", format_us_amount(self.loan_amount)),
        ];

        if self.has_name() {
            out.push(format!("Name: {} {}", self.first_name, self.last_name));
        }
        if let Some(income) = self.annual_income {
            out.push(format!("Income: ${}", format_us_amount(income)));
        }
        if let Some(debt) = self.total_debt {
            out.push(format!("Debt: ${}", format_us_amount(debt)));
        }
        if let Some(cashflow) = self.monthly_cashflow {
            out.push(format!("Cashflow: ${}", format_us_amount(cashflow)));
        }
        if let Some(age) = self.applicant_age {
            out.push(format!("Age: {}", age));
        }

        out
    }

    /// Field value rendered as plain text, `None` when unset.
    pub fn value_of(&self, field: Field) -> Option<String> {
        match field {
            Field::Ssn => Some(self.ssn.clone()),
            Field::FirstName => Some(self.first_name.clone()),
            Field::LastName => Some(self.last_name.clone()),
            Field::LoanAmount => Some(self.loan_amount.normalize().to_string()),
            Field::LoanPurpose => Some(self.loan_purpose.clone()),
            Field::AnnualIncome => self.annual_income.map(|d| d.normalize().to_string()),
            Field::TotalDebt => self.total_debt.map(|d| d.normalize().to_string()),
            Field::MonthlyCashflow => self.monthly_cashflow.map(|d| d.normalize().to_string()),
            Field::ApplicantAge => self.applicant_age.map(|a| a.to_string()),
        }
    }
}

/// Identifies a field of [`ExtractedRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Ssn,
    FirstName,
    LastName,
    LoanAmount,
    LoanPurpose,
    AnnualIncome,
    TotalDebt,
    MonthlyCashflow,
    ApplicantAge,
}

impl Field {
    /// All fields in submission order.
    pub const ALL: [Field; 9] = [
        Field::Ssn,
        Field::FirstName,
        Field::LastName,
        Field::LoanAmount,
        Field::LoanPurpose,
        Field::AnnualIncome,
        Field::TotalDebt,
        Field::MonthlyCashflow,
        Field::ApplicantAge,
    ];

    /// Record key (camelCase).
    pub fn identifier(&self) -> &'static str {
        match self {
            Field::Ssn => "ssn",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::LoanAmount => "loanAmount",
            Field::LoanPurpose => "loanPurpose",
            Field::AnnualIncome => "annualIncome",
            Field::TotalDebt => "totalDebt",
            Field::MonthlyCashflow => "monthlyCashflow",
            Field::ApplicantAge => "applicantAge",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> ExtractedRecord {
        ExtractedRecord {
            ssn: "123-45-6789".to_string(),
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            loan_amount: Decimal::from(50_000),
            loan_purpose: "Home Renovation".to_string(),
            annual_income: Some(Decimal::from(85_000)),
            total_debt: None,
            monthly_cashflow: Some(Decimal::from(-250)),
            applicant_age: Some(35),
        }
    }

    #[test]
    fn test_serializes_as_submission_body() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["ssn"], "123-45-6789");
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["loanAmount"], 50000.0);
        assert_eq!(json["monthlyCashflow"], -250.0);
        assert_eq!(json["applicantAge"], 35);
        assert!(json.get("totalDebt").is_none());
    }

    #[test]
    fn test_highlights() {
        let highlights = sample().highlights();
        assert_eq!(
            highlights,
            vec![
                "SSN: 123-45-6789",
                "Amount: $50,000",
                "Name: John Smith",
                "Income: $85,000",
                "Cashflow: $-250",
                "Age: 35",
            ]
        );
    }

    #[test]
    fn test_highlights_skip_default_name() {
        let mut record = sample();
        record.first_name = DEFAULT_FIRST_NAME.to_string();
        record.last_name = DEFAULT_LAST_NAME.to_string();

        assert!(!record.has_name());
        assert!(!record.highlights().iter().any(|h| h.starts_with("Name:")));
    }

    #[test]
    fn test_value_of() {
        let mut record = sample();
        record.loan_amount = Decimal::from_str("45000.00").unwrap();

        assert_eq!(record.value_of(Field::LoanAmount).as_deref(), Some("45000"));
        assert_eq!(record.value_of(Field::TotalDebt), None);
        assert_eq!(record.value_of(Field::ApplicantAge).as_deref(), Some("35"));
    }

    #[test]
    fn test_field_identifiers_are_camel_case() {
        let keys: Vec<&str> = Field::ALL.iter().map(Field::identifier).collect();
        assert_eq!(keys[3], "loanAmount");
        assert_eq!(keys[8], "applicantAge");
    }
}
