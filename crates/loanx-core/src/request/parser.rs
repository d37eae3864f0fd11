//! Loan request parser: runs every field extractor and validates the result.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{RequiredField, ValidationFailure};
use crate::models::request::{
    ExtractedRecord, Field, DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME, DEFAULT_LOAN_PURPOSE,
};

use super::rules::{
    AgeExtractor, AmountExtractor, ExtractionMatch, FieldExtractor, NameExtractor,
    PurposeExtractor, SsnExtractor,
};
use super::RequestExtractor;

/// Which rule produced a field, and from what text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTrace {
    pub field: Field,
    pub rule: &'static str,
    pub source: String,
}

impl FieldTrace {
    fn from_match<T>(field: Field, m: &ExtractionMatch<T>) -> Self {
        Self {
            field,
            rule: m.rule,
            source: m.source.clone(),
        }
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// Validated record.
    pub record: ExtractedRecord,
    /// Rule that matched each field found in the text, in field order.
    pub trace: Vec<FieldTrace>,
    /// Fields filled from defaults.
    pub defaulted: Vec<Field>,
}

/// Loan request parser.
///
/// Holds one extractor per field. Stateless between calls: parsing the same
/// text always gives the same result.
pub struct LoanRequestParser {
    ssn: SsnExtractor,
    names: NameExtractor,
    loan_amount: AmountExtractor,
    purpose: PurposeExtractor,
    annual_income: AmountExtractor,
    total_debt: AmountExtractor,
    monthly_cashflow: AmountExtractor,
    age: AgeExtractor,
}

impl LoanRequestParser {
    /// Create a parser with the standard rule set.
    pub fn new() -> Self {
        Self {
            ssn: SsnExtractor::new(),
            names: NameExtractor::new(),
            loan_amount: AmountExtractor::loan_amount(),
            purpose: PurposeExtractor::new(),
            annual_income: AmountExtractor::annual_income(),
            total_debt: AmountExtractor::total_debt(),
            monthly_cashflow: AmountExtractor::monthly_cashflow(),
            age: AgeExtractor::new(),
        }
    }

    /// Parse a loan request, keeping the per-field trace.
    pub fn parse(&self, text: &str) -> Result<ExtractionResult, ValidationFailure> {
        info!("Parsing loan request from {} characters of text", text.len());

        let mut trace = Vec::new();
        let mut defaulted = Vec::new();

        let ssn = self.ssn.extract(text);
        let name = self.names.extract(text).unwrap_or_default();
        let loan_amount = self.loan_amount.extract(text);
        let purpose = self.purpose.extract(text);
        let annual_income = self.annual_income.extract(text);
        let total_debt = self.total_debt.extract(text);
        let monthly_cashflow = self.monthly_cashflow.extract(text);
        let age = self.age.extract(text);

        let (ssn, loan_amount) = match (ssn, loan_amount) {
            (Some(ssn), Some(amount)) => (ssn, amount),
            (ssn, amount) => {
                let missing = RequiredField::ALL.into_iter().filter(|field| match field {
                    RequiredField::Ssn => ssn.is_none(),
                    RequiredField::LoanAmount => amount.is_none(),
                });
                let failure = ValidationFailure::new(missing);
                debug!("Loan request incomplete: {}", failure);
                return Err(failure);
            }
        };

        trace.push(FieldTrace::from_match(Field::Ssn, &ssn));

        let first_name = match name.first {
            Some(m) => {
                trace.push(FieldTrace::from_match(Field::FirstName, &m));
                m.value
            }
            None => {
                defaulted.push(Field::FirstName);
                DEFAULT_FIRST_NAME.to_string()
            }
        };
        let last_name = match name.last {
            Some(m) => {
                trace.push(FieldTrace::from_match(Field::LastName, &m));
                m.value
            }
            None => {
                defaulted.push(Field::LastName);
                DEFAULT_LAST_NAME.to_string()
            }
        };

        trace.push(FieldTrace::from_match(Field::LoanAmount, &loan_amount));

        let loan_purpose = match purpose {
            Some(m) => {
                trace.push(FieldTrace::from_match(Field::LoanPurpose, &m));
                m.value
            }
            None => {
                defaulted.push(Field::LoanPurpose);
                DEFAULT_LOAN_PURPOSE.to_string()
            }
        };

        let optional = [
            (Field::AnnualIncome, &annual_income),
            (Field::TotalDebt, &total_debt),
            (Field::MonthlyCashflow, &monthly_cashflow),
        ];
        for (field, m) in optional {
            if let Some(m) = m {
                trace.push(FieldTrace::from_match(field, m));
            }
        }
        if let Some(m) = &age {
            trace.push(FieldTrace::from_match(Field::ApplicantAge, m));
        }

        let record = ExtractedRecord {
            ssn: ssn.value,
            first_name,
            last_name,
            loan_amount: loan_amount.value,
            loan_purpose,
            annual_income: annual_income.map(|m| m.value),
            total_debt: total_debt.map(|m| m.value),
            monthly_cashflow: monthly_cashflow.map(|m| m.value),
            applicant_age: age.map(|m| m.value),
        };

        debug!(
            "Extracted loan request for {} {}: {} fields matched, {} defaulted",
            record.first_name,
            record.last_name,
            trace.len(),
            defaulted.len()
        );

        Ok(ExtractionResult {
            record,
            trace,
            defaulted,
        })
    }
}

impl Default for LoanRequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestExtractor for LoanRequestParser {
    fn extract(&self, text: &str) -> Result<ExtractedRecord, ValidationFailure> {
        self.parse(text).map(|r| r.record)
    }
}
