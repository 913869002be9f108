use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

const SLACK_FLOW: &str =
    r#"{"nodes":[{"credentials":{"slackApi":{"id":"abc123","name":"My Slack"}}}]}"#;

fn flowscrub(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("flowscrub").unwrap();
    cmd.current_dir(dir)
        .env_remove("FLOWSCRUB_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn run_with_defaults_skips_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("document-ingestion-workflow.json"), SLACK_FLOW).unwrap();

    flowscrub(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing: document-ingestion-workflow.json"))
        .stdout(predicate::str::contains("Successfully sanitized 1/2 workflows"))
        .stdout(predicate::str::contains("Manually verify the sanitized files"))
        .stderr(predicate::str::contains(
            "Warning: query-interface-workflow.json not found in current directory",
        ));

    let written = std::fs::read_to_string(
        temp.path()
            .join("workflows")
            .join("document-ingestion-workflow.json"),
    )
    .unwrap();
    let document: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        serde_json::to_string(&document).unwrap(),
        r#"{"nodes":[{"credentials":{"slackApi":{"id":"YOUR_CREDENTIAL_ID_HERE","name":"YOUR_SLACKAPI_CREDENTIAL"}}}]}"#
    );
}

#[test]
fn run_with_no_inputs_present_still_completes() {
    let temp = tempfile::tempdir().unwrap();

    flowscrub(temp.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully sanitized 0/2 workflows"));

    assert!(temp.path().join("workflows").is_dir());
}

#[test]
fn run_reports_invalid_json_and_continues() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("broken.json"), "{").unwrap();
    std::fs::write(temp.path().join("flow.json"), SLACK_FLOW).unwrap();

    flowscrub(temp.path())
        .args(["run", "broken.json", "flow.json", "--output-dir", "clean"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Error processing broken.json"))
        .stdout(predicate::str::contains("Successfully sanitized 1/2 workflows"));

    assert!(temp.path().join("clean").join("flow.json").is_file());
    assert!(!temp.path().join("clean").join("broken.json").exists());
}

#[test]
fn run_failures_are_logged_at_error_level() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("broken.json"), "{").unwrap();

    flowscrub(temp.path())
        .env("RUST_LOG", "error")
        .args(["run", "broken.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("Failed to sanitize"));

    flowscrub(temp.path())
        .args(["run", "broken.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ERROR").not());
}

#[test]
fn run_uses_project_config() {
    let temp = tempfile::tempdir().unwrap();
    let sub = temp.path().join("sub");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(
        temp.path().join("flowscrub.toml"),
        r#"
inputs = ["exports/*.json"]
output_dir = "sanitized"

[placeholders]
credential_id = "REPLACE_ME"
"#,
    )
    .unwrap();
    std::fs::create_dir_all(temp.path().join("exports")).unwrap();
    std::fs::write(temp.path().join("exports").join("a.json"), SLACK_FLOW).unwrap();

    flowscrub(&sub)
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully sanitized 1/1 workflows"));

    let written = std::fs::read_to_string(
        temp.path()
            .join("sanitized")
            .join("exports")
            .join("a.json"),
    )
    .unwrap();
    assert!(written.contains("\"id\": \"REPLACE_ME\""));
    assert!(written.contains("\"name\": \"YOUR_SLACKAPI_CREDENTIAL\""));
}

#[test]
fn file_writes_to_stdout() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("flow.json"), SLACK_FLOW).unwrap();

    flowscrub(temp.path())
        .args(["file", "flow.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"id\": \"YOUR_CREDENTIAL_ID_HERE\"",
        ))
        .stdout(predicate::str::contains("abc123").not());

    assert!(!temp.path().join("workflows").exists());
}

#[test]
fn file_fails_on_missing_input() {
    let temp = tempfile::tempdir().unwrap();

    flowscrub(temp.path())
        .args(["file", "absent.json", "-o", "out.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.json"));
}

#[test]
fn check_fails_until_sanitized() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("flow.json"), SLACK_FLOW).unwrap();

    flowscrub(temp.path())
        .args(["check", "flow.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("slackApi id=abc123"));

    flowscrub(temp.path())
        .args(["run", "flow.json"])
        .assert()
        .success();

    flowscrub(&temp.path().join("workflows"))
        .args(["check", "flow.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No credential identities found"));
}

#[test]
fn check_without_arguments_targets_sanitized_copies() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("document-ingestion-workflow.json"), SLACK_FLOW).unwrap();

    flowscrub(temp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "document-ingestion-workflow.json not found in workflows",
        ));

    flowscrub(temp.path()).arg("run").assert().success();

    flowscrub(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ document-ingestion-workflow.json"))
        .stdout(predicate::str::contains("No credential identities found"));
}

#[test]
fn init_writes_config_once() {
    let temp = tempfile::tempdir().unwrap();

    flowscrub(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created flowscrub.toml"));

    let content = std::fs::read_to_string(temp.path().join("flowscrub.toml")).unwrap();
    assert!(content.contains("document-ingestion-workflow.json"));

    flowscrub(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
