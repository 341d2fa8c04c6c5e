//! End-to-end tests running the `live-events` binary.
//!
//! Every run gets an empty home directory and a UTC clock, so the built-in
//! sample groups into the same days on every machine.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn live_events_binary() -> String {
    env!("CARGO_BIN_EXE_live-events").to_string()
}

fn command(home: &Path) -> Command {
    let mut command = Command::new(live_events_binary());
    command
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("TZ", "UTC")
        .env_remove("RUST_LOG")
        .env_remove("LE_FIXTURE_PATH")
        .env_remove("LE_API_BASE_URL");
    command
}

fn run(home: &Path, args: &[&str]) -> Output {
    let output = command(home)
        .args(args)
        .output()
        .expect("failed to run live-events");
    assert!(
        output.status.success(),
        "live-events {args:?} should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_list_json_live_only() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["list", "--json", "--status", "live"]);

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 2);
    assert_eq!(value["days"].as_array().unwrap().len(), 1);
    assert_eq!(value["days"][0]["date"], "2025-12-16");
    for group in value["days"][0]["competitions"].as_array().unwrap() {
        for event in group["events"].as_array().unwrap() {
            assert_eq!(event["status"], "live");
        }
    }
}

#[test]
fn test_list_query_and_favourite() {
    let temp = TempDir::new().unwrap();
    let output = run(
        temp.path(),
        &["list", "--query", "villa", "--favourite", "evt_001"],
    );

    let text = stdout(&output);
    assert!(text.contains("Tuesday, Dec 16, 2025 (1 event)"));
    assert!(text.contains("Arsenal 1 - 1 Aston Villa ★"));
    assert!(!text.contains("Chelsea"));
}

#[test]
fn test_list_without_matches_shows_hint() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["list", "--query", "curling"]);
    assert!(stdout(&output).contains("No events found."));
}

#[test]
fn test_channels_lists_sample_directory() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["channels"]);

    let text = stdout(&output);
    assert!(text.starts_with("TV CHANNELS (6)\n"));
    assert!(text.contains("Ten Sports"));
    assert!(text.contains("Free"));
}

#[test]
fn test_malformed_record_is_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    let fixture = temp.path().join("events.json");
    std::fs::write(
        &fixture,
        r#"{
            "events": [
                {
                    "id": "good",
                    "sport": "Tennis",
                    "competition": "ATP Finals",
                    "startTimeISO": "2025-11-16T14:00:00Z",
                    "status": "finished",
                    "home": { "name": "Sinner", "score": 2 },
                    "away": { "name": "Alcaraz", "score": 0 }
                },
                {
                    "id": "bad",
                    "competition": "ATP Finals",
                    "startTimeISO": "not a date",
                    "status": "upcoming"
                }
            ]
        }"#,
    )
    .unwrap();

    let output = run(temp.path(), &["list", "--file", fixture.to_str().unwrap()]);

    let text = stdout(&output);
    assert!(text.contains("Sinner 2 - 0 Alcaraz"));
    assert!(text.contains("Skipped 1 malformed record:"));
    assert!(text.contains("#1 bad: event bad has invalid start time"));
}

#[test]
fn test_missing_file_fails_with_context() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.json");
    let output = command(temp.path())
        .args(["list", "--file", missing.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn test_config_fixture_path_is_used() {
    let temp = TempDir::new().unwrap();
    let fixture = temp.path().join("mine.json");
    std::fs::write(
        &fixture,
        r#"{"events": [], "channels": [{"id": "dazn", "name": "DAZN"}]}"#,
    )
    .unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(
        &config,
        format!("fixture_path = {:?}\n", fixture.to_str().unwrap()),
    )
    .unwrap();

    let output = run(
        temp.path(),
        &["--config", config.to_str().unwrap(), "channels", "--json"],
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["name"], "DAZN");
}

#[test]
fn test_search_applies_final_query_at_end_of_input() {
    let temp = TempDir::new().unwrap();
    let mut child = command(temp.path())
        .arg("search")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"che\nchelsea\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("Search: \"\"\n"));
    assert!(text.contains("Search: \"chelsea\"\n"));
    assert!(text.contains("Chelsea 2 - 0 Everton"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &[]);
    assert!(stdout(&output).contains("Usage: live-events"));
}
