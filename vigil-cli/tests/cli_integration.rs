// vigil-cli/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vigil_cmd() -> Command {
    Command::cargo_bin("vigil").expect("Failed to find vigil binary")
}

#[test]
fn test_analyze_empty_directory_writes_zero_percent_report() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let log_dir = tempdir()?;

    let report_path = output_dir.path().join("report.json");

    // No videos in the input directory: the run must still succeed and
    // persist the empty-batch summary without touching the analyzer.
    let mut cmd = vigil_cmd();
    cmd.arg("analyze")
        .arg(input_dir.path())
        .arg("--output")
        .arg(&report_path)
        .arg("--log-dir")
        .arg(log_dir.path())
        .arg("--api-key")
        .arg("test-key");

    cmd.assert().success();

    let document = fs::read_to_string(&report_path)?;
    let parsed: serde_json::Value = serde_json::from_str(&document)?;

    assert_eq!(parsed["processing_summary"]["total_videos"], 0);
    assert_eq!(parsed["processing_summary"]["success_rate"], "0%");
    assert!(parsed["video_results"].as_object().unwrap().is_empty());

    Ok(())
}

#[test]
fn test_analyze_rejects_nonexistent_input_dir() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    let mut cmd = vigil_cmd();
    cmd.arg("analyze")
        .arg("surely_this_does_not_exist_42_cli")
        .arg("--output")
        .arg(output_dir.path().join("report.json"))
        .arg("--api-key")
        .arg("test-key");

    cmd.assert()
        .failure()
        .stderr(contains("Invalid input path"));

    Ok(())
}

#[test]
fn test_analyze_requires_an_api_key() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;

    let mut cmd = vigil_cmd();
    cmd.env_remove("GOOGLE_API_KEY");
    cmd.arg("analyze").arg(input_dir.path());

    cmd.assert().failure();

    Ok(())
}
