//! Extract command - turn a single free-text request into a record.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use loanx_core::models::config::{LoanxConfig, OutputFormat};
use loanx_core::{ExtractionResult, LoanRequestParser};

use super::render::{self, FormatArg};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Request text (read from stdin when neither TEXT nor --file is given)
    #[arg(conflicts_with = "file")]
    text: Option<String>,

    /// Read the request from a text file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Output file for the record, or for the failure report (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Show which rule matched each field
    #[arg(long)]
    explain: bool,
}

pub fn run(args: ExtractArgs, config: &LoanxConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let text = read_request(&args)?;
    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);

    info!("Extracting loan request ({} characters)", text.len());

    let parser = LoanRequestParser::new();
    let result = match parser.parse(&text) {
        Ok(result) => result,
        Err(failure) => {
            let report = render::failure(&failure, format, config.output.pretty)?;
            emit(&report, args.output.as_deref())?;
            anyhow::bail!(
                "Loan request is incomplete ({} required field(s) missing)",
                failure.missing().len()
            );
        }
    };

    let output = render::record(&result.record, format, config.output.pretty)?;
    emit(&output, args.output.as_deref())?;

    if args.explain {
        explain(&result);
    }

    debug!("Total extraction time: {:?}", start.elapsed());

    Ok(())
}

/// Write to the output file when one was given, otherwise to stdout.
fn emit(content: &str, output_path: Option<&Path>) -> anyhow::Result<()> {
    match output_path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Output written to {}", style("✓").green(), path.display());
        }
        None => println!("{}", content.trim_end()),
    }
    Ok(())
}

fn read_request(args: &ExtractArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    debug!("Reading request from stdin");
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read request from stdin")?;
    Ok(text)
}

/// Rule trace goes to stderr so stdout stays parseable.
fn explain(result: &ExtractionResult) {
    eprintln!();
    eprintln!("{} Matched fields:", style("ℹ").blue());
    for entry in &result.trace {
        eprintln!(
            "  {:<16} {:<14} {:?}",
            entry.field.identifier(),
            style(entry.rule).cyan(),
            entry.source
        );
    }

    if !result.defaulted.is_empty() {
        let defaulted: Vec<&str> = result.defaulted.iter().map(|f| f.identifier()).collect();
        eprintln!(
            "{} Defaulted: {}",
            style("ℹ").blue(),
            defaulted.join(", ")
        );
    }
}
