//! End-to-end tests for the CLI commands
//!
//! Commands write their reports to a temporary output file which is then
//! read back as JSON.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use tessera::cli::compare::{self, CompareConfig};
use tessera::cli::info::{self, InfoConfig};
use tessera::cli::output::OutputFormat;
use tessera::cli::sniff::{self, SniffConfig};
use tessera::{SnifferOptions, TypeTag};

fn read_json(path: &std::path::Path) -> Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_sniff_file_to_json() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "id|name|amount|created").unwrap();
    writeln!(input, "10|alice|12.5|2024-01-15 08:30").unwrap();
    writeln!(input, "11|bob|7|2024-01-16 09:00").unwrap();
    writeln!(input, "12||3.25|2024-01-17 10:15").unwrap();

    let out = TempDir::new().unwrap();
    let report_path = out.path().join("report.json");
    sniff::sniff(SniffConfig {
        file: Some(input.path().to_path_buf()),
        delimiter: Some('|'),
        header: true,
        options: SnifferOptions::default(),
        output_format: OutputFormat::Pretty,
        output_file: Some(report_path.clone()),
    })
    .unwrap();

    let report = read_json(&report_path);
    assert_eq!(report["rows"], 3);
    let types: Vec<&str> = report["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["best_type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["Int32", "String", "Double", "DateTime"]);
    assert_eq!(report["columns"][1]["samples"], 2);
    assert_eq!(report["columns"][3]["db_type"], "DateTime2");
}

#[test]
fn test_sniff_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let err = sniff::sniff(SniffConfig {
        file: Some(dir.path().join("absent.txt")),
        delimiter: None,
        header: false,
        options: SnifferOptions::default(),
        output_format: OutputFormat::Json,
        output_file: None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("absent.txt"), "{err}");
}

#[rstest]
#[case("2", "2.0", "==")]
#[case("abc", "abd", "<")]
#[case("2024-05-01", "2024-04-30", ">")]
fn test_compare_to_json(#[case] left: &str, #[case] right: &str, #[case] ordering: &str) {
    let out = TempDir::new().unwrap();
    let path = out.path().join("compare.json");
    compare::compare(CompareConfig {
        left: left.to_string(),
        right: right.to_string(),
        left_type: None,
        right_type: None,
        output_format: OutputFormat::Json,
        output_file: Some(path.clone()),
    })
    .unwrap();
    assert_eq!(read_json(&path)["ordering"], ordering);
}

#[test]
fn test_info_to_json() {
    let out = TempDir::new().unwrap();
    let path = out.path().join("info.json");
    info::info(InfoConfig {
        tag: TypeTag::Guid,
        output_format: OutputFormat::Json,
        output_file: Some(path.clone()),
    })
    .unwrap();
    let info = read_json(&path);
    assert_eq!(info["tag"], "Guid");
    assert_eq!(info["db_type"], "Guid");
    assert_eq!(info["min_value"], "00000000-0000-0000-0000-000000000000");
}
