//! Batch command - extract loan requests from many text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use loanx_core::models::config::{LoanxConfig, OutputFormat};
use loanx_core::{ExtractedRecord, Field, LoanRequestParser, RequestExtractor, ValidationFailure};

use super::render::{self, FormatArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching request text files
    #[arg(required = true)]
    input: String,

    /// Treat every non-blank line as a separate request
    #[arg(long)]
    lines: bool,

    /// Output directory for extracted records
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each record (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

/// What happened to one request.
enum Outcome {
    Extracted(ExtractedRecord),
    Incomplete(ValidationFailure),
    Failed(String),
}

/// A single request in the batch: a whole file, or one line of it.
struct BatchEntry {
    path: PathBuf,
    line: Option<usize>,
    outcome: Outcome,
}

impl BatchEntry {
    fn source(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.path.display(), line),
            None => self.path.display().to_string(),
        }
    }

    fn output_name(&self, extension: &str) -> String {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("request");

        match self.line {
            Some(line) => format!("{}-{}.{}", stem, line, extension),
            None => format!("{}.{}", stem, extension),
        }
    }

    fn status(&self) -> &'static str {
        match self.outcome {
            Outcome::Extracted(_) => "extracted",
            Outcome::Incomplete(_) => "incomplete",
            Outcome::Failed(_) => "error",
        }
    }
}

pub fn run(args: BatchArgs, config: &LoanxConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
        )?
        .progress_chars("=>-"),
    );

    let parser = LoanRequestParser::new();
    let mut entries = Vec::new();

    for path in files {
        match fs::read_to_string(&path) {
            Ok(text) if args.lines => {
                entries.extend(extract_lines(&parser, &path, &text, &config.batch.comment_prefix));
            }
            Ok(text) => {
                entries.push(BatchEntry {
                    outcome: extract_one(&parser, &text),
                    path,
                    line: None,
                });
            }
            Err(e) if continue_on_error => {
                warn!("Failed to read {}: {}", path.display(), e);
                entries.push(BatchEntry {
                    path,
                    line: None,
                    outcome: Outcome::Failed(e.to_string()),
                });
            }
            Err(e) => {
                pb.abandon();
                error!("Failed to read {}: {}", path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", path.display(), e);
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    if let Some(ref output_dir) = args.output_dir {
        for entry in &entries {
            if let Outcome::Extracted(record) = &entry.outcome {
                let output_path = output_dir.join(entry.output_name(format.extension()));
                let content = render::record(record, format, config.output.pretty)?;
                fs::write(&output_path, content)
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &entries)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let count = |status: &str| entries.iter().filter(|e| e.status() == status).count();
    let (extracted, incomplete, failed) = (count("extracted"), count("incomplete"), count("error"));

    println!();
    println!(
        "{} Processed {} requests in {:?}",
        style("✓").green(),
        entries.len(),
        start.elapsed()
    );
    println!(
        "   {} extracted, {} incomplete, {} failed",
        style(extracted).green(),
        style(incomplete).yellow(),
        style(failed).red()
    );

    if incomplete > 0 {
        println!();
        println!("{}", style("Incomplete requests:").yellow());
        for entry in &entries {
            if let Outcome::Incomplete(failure) = &entry.outcome {
                println!("  - {}: missing {}", entry.source(), failure.joined());
            }
        }
    }

    if failed > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for entry in &entries {
            if let Outcome::Failed(message) = &entry.outcome {
                println!("  - {}: {}", entry.source(), message);
            }
        }
    }

    Ok(())
}

fn extract_one(parser: &LoanRequestParser, text: &str) -> Outcome {
    match parser.extract(text) {
        Ok(record) => Outcome::Extracted(record),
        Err(failure) => Outcome::Incomplete(failure),
    }
}

/// One entry per non-blank, non-comment line; line numbers are 1-based.
fn extract_lines(
    parser: &LoanRequestParser,
    path: &Path,
    text: &str,
    comment_prefix: &str,
) -> Vec<BatchEntry> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with(comment_prefix)
        })
        .map(|(i, line)| BatchEntry {
            path: path.to_path_buf(),
            line: Some(i + 1),
            outcome: extract_one(parser, line),
        })
        .collect()
}

fn write_summary(path: &Path, entries: &[BatchEntry]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    wtr.write_record([
        "source",
        "status",
        "ssn",
        "loanAmount",
        "firstName",
        "lastName",
        "missing",
        "error",
    ])?;

    for entry in entries {
        let (record, missing, error) = match &entry.outcome {
            Outcome::Extracted(record) => (Some(record), String::new(), String::new()),
            Outcome::Incomplete(failure) => {
                let missing: Vec<&str> = failure.missing().iter().map(|f| f.identifier()).collect();
                (None, missing.join(";"), String::new())
            }
            Outcome::Failed(message) => (None, String::new(), message.clone()),
        };

        let value = |field: Field| record.and_then(|r| r.value_of(field)).unwrap_or_default();

        wtr.write_record([
            entry.source(),
            entry.status().to_string(),
            value(Field::Ssn),
            value(Field::LoanAmount),
            value(Field::FirstName),
            value(Field::LastName),
            missing,
            error,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_lines_skips_blanks_and_comments() {
        let text = "# requests from the web form\n\
                    ssn 123-45-6789, need $10,000\n\
                    \n\
                    hello, I need a loan\n";

        let entries = extract_lines(&LoanRequestParser::new(), Path::new("forms.txt"), text, "#");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source(), "forms.txt:2");
        assert_eq!(entries[0].status(), "extracted");
        assert_eq!(entries[1].source(), "forms.txt:4");
        assert_eq!(entries[1].status(), "incomplete");
    }

    #[test]
    fn test_output_name_includes_line() {
        let entry = BatchEntry {
            path: PathBuf::from("in/requests.txt"),
            line: Some(7),
            outcome: Outcome::Failed("boom".to_string()),
        };
        assert_eq!(entry.output_name("json"), "requests-7.json");

        let whole = BatchEntry { line: None, ..entry };
        assert_eq!(whole.output_name("csv"), "requests.csv");
    }
}
