use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

/// `loanx` with its config directory pointed at a scratch location.
fn loanx(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("loanx").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path());
    cmd
}

#[test]
fn extract_prints_json_record() {
    let home = TempDir::new().unwrap();
    let output = loanx(&home)
        .args(["extract", "ssn 123-45-6789, need $10,000"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["ssn"], "123-45-6789");
    assert_eq!(json["loanAmount"], 10000.0);
    assert_eq!(json["firstName"], "Applicant");
    assert_eq!(json["lastName"], "User");
    assert_eq!(json["loanPurpose"], "General Purpose");
    assert!(json.get("annualIncome").is_none());
}

#[test]
fn extract_reports_missing_fields_in_order() {
    let home = TempDir::new().unwrap();
    let output = loanx(&home)
        .args(["extract", "I need a loan for a car"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["missing"][0]["field"], "ssn");
    assert_eq!(json["missing"][1]["field"], "loanAmount");
    assert!(String::from_utf8_lossy(&output.stderr).contains("incomplete"));
}

#[test]
fn extract_failure_as_text_includes_prompt() {
    let home = TempDir::new().unwrap();
    loanx(&home)
        .args(["extract", "--format", "text", "ssn 123-45-6789 and that's it"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Missing required information: loan amount (e.g., $50,000).",
        ))
        .stdout(predicate::str::contains(
            "Please include: \"loan amount (e.g., $50,000)\" in your message.",
        ));
}

#[test]
fn extract_writes_failure_to_output_file() {
    let home = TempDir::new().unwrap();
    let report = home.path().join("report.json");

    loanx(&home)
        .args(["extract", "I need a loan for a car", "--output"])
        .arg(&report)
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"missing\"").not())
        .stderr(predicate::str::contains("incomplete"));

    let json: Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["missing"][0]["field"], "ssn");
    assert_eq!(json["missing"][1]["field"], "loanAmount");
    assert_eq!(
        json["prompt"],
        "Please include: \"SSN (e.g., 123-45-6789) and loan amount (e.g., $50,000)\" in your message."
    );
}

#[test]
fn extract_reads_file_as_csv() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("request.txt");
    fs::write(&input, "My name is John Smith.\nSSN: 123-45-6789\nloan amount: $45,000 dollars\n").unwrap();

    let output = loanx(&home)
        .args(["extract", "--format", "csv", "--file"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "ssn,firstName,lastName,loanAmount,loanPurpose,annualIncome,totalDebt,monthlyCashflow,applicantAge",
            "123-45-6789,John,Smith,45000,General Purpose,,,,",
        ]
    );
}

#[test]
fn extract_reads_stdin() {
    let home = TempDir::new().unwrap();
    loanx(&home)
        .arg("extract")
        .write_stdin("my id is 123456789, need 4000")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ssn\":\"123-45-6789\""));
}

#[test]
fn extract_explain_lists_rules_on_stderr() {
    let home = TempDir::new().unwrap();
    loanx(&home)
        .args(["extract", "--explain", "call 123-45-6789 please, I want 7500"])
        .assert()
        .success()
        .stderr(predicate::str::contains("delimited"))
        .stderr(predicate::str::contains("intent"))
        .stderr(predicate::str::contains(
            "Defaulted: firstName, lastName, loanPurpose",
        ));
}

#[test]
fn extract_missing_file_fails() {
    let home = TempDir::new().unwrap();
    loanx(&home)
        .args(["extract", "--file"])
        .arg(home.path().join("absent.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_lines_writes_records_and_summary() {
    let home = TempDir::new().unwrap();
    let inputs = home.path().join("inputs");
    let out = home.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(
        inputs.join("requests.txt"),
        "# web form export\n\
         ssn 123-45-6789, need $10,000\n\
         I'm Ana Ruiz, id 987-65-4321, requesting 25,000 for tuition\n\
         \n\
         I need a loan for a car\n",
    )
    .unwrap();

    loanx(&home)
        .args(["batch", "--lines", "--summary", "--output-dir"])
        .arg(&out)
        .arg(format!("{}/*.txt", inputs.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("2 extracted, 1 incomplete, 0 failed"));

    assert!(out.join("requests-2.json").exists());
    assert!(out.join("requests-3.json").exists());
    assert!(!out.join("requests-5.json").exists());

    let record: Value =
        serde_json::from_str(&fs::read_to_string(out.join("requests-3.json")).unwrap()).unwrap();
    assert_eq!(record["firstName"], "Ana");
    assert_eq!(record["loanPurpose"], "Tuition");

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "source,status,ssn,loanAmount,firstName,lastName,missing,error");
    assert!(lines[1].ends_with(":2,extracted,123-45-6789,10000,Applicant,User,,"));
    assert!(lines[2].ends_with(":3,extracted,987-65-4321,25000,Ana,Ruiz,,"));
    assert!(lines[3].ends_with(":5,incomplete,,,,,ssn;loanAmount,"));
}

#[test]
fn batch_whole_files() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("a.txt"), "ssn 111-22-3333\nloan $2,000").unwrap();
    fs::write(home.path().join("b.txt"), "nothing useful here").unwrap();

    loanx(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", home.path().display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"))
        .stdout(predicate::str::contains("1 extracted, 1 incomplete, 0 failed"))
        .stdout(predicate::str::contains("b.txt: missing SSN (e.g., 123-45-6789)"));
}

#[test]
fn batch_without_matches_fails() {
    let home = TempDir::new().unwrap();
    loanx(&home)
        .arg("batch")
        .arg(format!("{}/*.txt", home.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_file_changes_default_format() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("loanx.json");

    loanx(&home)
        .args(["config", "init", "-c"])
        .arg(&config)
        .assert()
        .success();
    assert!(config.exists());

    loanx(&home)
        .args(["config", "set", "output.format", "csv", "-c"])
        .arg(&config)
        .assert()
        .success();

    loanx(&home)
        .args(["config", "get", "output.format", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"csv\""));

    loanx(&home)
        .args(["extract", "ssn 123-45-6789, need $10,000", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ssn,firstName,lastName"));
}

#[test]
fn config_set_rejects_unknown_log_level() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("loanx.json");

    loanx(&home)
        .args(["config", "set", "logging.level", "loud", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown log level"));

    loanx(&home)
        .args(["config", "set", "output.colour", "true", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
