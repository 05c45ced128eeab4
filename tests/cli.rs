//! The command line front end, driven through `execute` with captured output.

use std::fs;

use agenda_sift::cli::{execute, Cli};
use agenda_sift::config::ProcessConfig;
use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

struct Run {
    ok: bool,
    out: String,
    diag: String,
}

fn run(args: &[&str]) -> Run {
    let cli =
        Cli::try_parse_from(std::iter::once("agenda-sift").chain(args.iter().copied())).unwrap();
    let (mut out, mut diag) = (Vec::new(), Vec::new());
    let ok = execute(&cli, &mut out, &mut diag);
    Run {
        ok,
        out: String::from_utf8(out).unwrap(),
        diag: String::from_utf8(diag).unwrap(),
    }
}

fn write_config(dir: &TempDir) -> String {
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "filters": [{"kind": "exclude_exact_value", "column": "B", "values": ["1"]}],
            "primary": {"column": "A", "priority": "z"},
            "secondary": {"column": "A", "priority": "-"}
        }"#,
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn missing_input_fails_with_error_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("nope.csv");
    let run = run(&[input.to_str().unwrap()]);

    assert!(!run.ok);
    let report: Value = serde_json::from_str(&run.out).unwrap();
    assert_eq!(report["status"], "error");
    assert!(report["message"].as_str().unwrap().contains("nope.csv"));
    assert!(report.get("processedRows").is_none());
}

#[test]
fn bad_config_still_prints_a_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "A,B\nx,1\n").unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{ not json").unwrap();

    let run = run(&[input.to_str().unwrap(), "-c", config.to_str().unwrap()]);
    assert!(!run.ok);
    let report: Value = serde_json::from_str(&run.out).unwrap();
    assert_eq!(report["status"], "error");
    assert_eq!(fs::read_to_string(&input).unwrap(), "A,B\nx,1\n");
}

#[test]
fn success_reports_counts_and_writes_back() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "A,B\nx,1\nz,0\ny,0\n").unwrap();
    let config = write_config(&dir);

    let run = run(&[input.to_str().unwrap(), "--config", &config]);
    assert!(run.ok);
    let report: Value = serde_json::from_str(&run.out).unwrap();
    assert_eq!(report["status"], "success");
    assert_eq!(report["processedRows"], 3);
    assert_eq!(report["remainingRows"], 2);
    assert_eq!(fs::read_to_string(&input).unwrap(), "A,B\nz,0\ny,0\n");
}

#[test]
fn preview_goes_to_diagnostics_not_the_report() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.csv");
    fs::write(&input, "A,B\nx,1\nz,0\n").unwrap();
    let config = write_config(&dir);

    let run = run(&[
        input.to_str().unwrap(),
        "--config",
        &config,
        "--dry-run",
        "--preview",
        "10",
    ]);
    assert!(run.ok);
    let report: Value = serde_json::from_str(&run.out).unwrap();
    assert_eq!(report["remainingRows"], 1);
    assert!(run.diag.contains('z'));
    assert!(run.diag.contains('+'));
    assert_eq!(fs::read_to_string(&input).unwrap(), "A,B\nx,1\nz,0\n");
}

#[test]
fn print_config_emits_the_default_rules() {
    let run = run(&["--print-config"]);
    assert!(run.ok);
    let printed = ProcessConfig::from_json_str(&run.out).unwrap();
    assert_eq!(printed, ProcessConfig::default());
    assert!(run.diag.is_empty());
}

#[test]
fn print_config_with_unreadable_config_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    let run = run(&["--print-config", "--config", missing.to_str().unwrap()]);
    assert!(!run.ok);
    assert!(run.out.is_empty());
}
