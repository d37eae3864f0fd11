//! Rendering of records and failures for terminal and file output.

use loanx_core::{format_us_amount, ExtractedRecord, Field, OutputFormat, ValidationFailure};

/// Output format flag.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

/// Render a record in the given format.
pub fn record(record: &ExtractedRecord, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

/// Render a validation failure. JSON keeps the structured field list,
/// other formats print the message and the re-prompt.
pub fn failure(failure: &ValidationFailure, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(failure)?),
        OutputFormat::Json => Ok(serde_json::to_string(failure)?),
        OutputFormat::Csv | OutputFormat::Text => Ok(format!("{}\n{}", failure, failure.prompt())),
    }
}

fn format_csv(record: &ExtractedRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(Field::ALL.iter().map(Field::identifier))?;
    wtr.write_record(
        Field::ALL
            .iter()
            .map(|f| record.value_of(*f).unwrap_or_default()),
    )?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ExtractedRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Applicant: {} {}\n", record.first_name, record.last_name));
    output.push_str(&format!("SSN: {}\n", record.ssn));
    output.push_str(&format!("Loan amount: ${}\n", format_us_amount(record.loan_amount)));
    output.push_str(&format!("Purpose: {}\n", record.loan_purpose));

    if let Some(income) = record.annual_income {
        output.push_str(&format!("Annual income: ${}\n", format_us_amount(income)));
    }
    if let Some(debt) = record.total_debt {
        output.push_str(&format!("Total debt: ${}\n", format_us_amount(debt)));
    }
    if let Some(cashflow) = record.monthly_cashflow {
        output.push_str(&format!("Monthly cashflow: ${}\n", format_us_amount(cashflow)));
    }
    if let Some(age) = record.applicant_age {
        output.push_str(&format!("Age: {}\n", age));
    }

    output.push('\n');
    output.push_str(&format!("I extracted: {}\n", record.highlights().join(", ")));

    output
}
