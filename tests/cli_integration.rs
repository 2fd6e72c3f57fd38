/// CLI integration tests for vitalboard.
///
/// Each test spawns the compiled binary via `assert_cmd::cargo_bin_cmd!` and
/// sets `VITALBOARD_HOME` to a fresh `TempDir` so tests never touch the real
/// `~/.vitalboard`.
mod common;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

// ── helpers ──────────────────────────────────────────────────────────────────

fn cmd_in(dir: &TempDir) -> assert_cmd::Command {
    let mut c = cargo_bin_cmd!("vitalboard");
    c.env("VITALBOARD_HOME", dir.path());
    c.env_remove("VITALBOARD_LOG");
    c
}

fn parse_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stdout.clone();
    serde_json::from_slice(&bytes).expect("stdout is not valid JSON")
}

fn parse_stderr_json(output: &assert_cmd::assert::Assert) -> Value {
    let bytes = output.get_output().stderr.clone();
    let text = String::from_utf8(bytes).unwrap();
    let last = text.lines().last().expect("stderr is empty");
    serde_json::from_str(last).expect("stderr is not valid JSON")
}

/// One JSON envelope per stdout line.
fn parse_json_lines(output: &assert_cmd::assert::Assert) -> Vec<Value> {
    String::from_utf8(output.get_output().stdout.clone())
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("stdout line is not valid JSON"))
        .collect()
}

fn write_snapshot(dir: &TempDir, activity: Option<&str>, metrics: &[(&str, &str)]) -> PathBuf {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, common::snapshot_json(activity, metrics)).unwrap();
    path
}

/// A running `watch` process driven line by line.
struct LiveWatch {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl LiveWatch {
    fn start(dir: &TempDir, args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_vitalboard"))
            .arg("watch")
            .args(args)
            .env("VITALBOARD_HOME", dir.path())
            .env_remove("VITALBOARD_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .unwrap();
        let stdin = child.stdin.take();
        let stdout = BufReader::new(child.stdout.take().unwrap());
        Self {
            child,
            stdin,
            stdout,
        }
    }

    fn send(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().unwrap();
        writeln!(stdin, "{}", line).unwrap();
        stdin.flush().unwrap();
    }

    fn next_json(&mut self) -> Value {
        let mut line = String::new();
        let n = self.stdout.read_line(&mut line).unwrap();
        assert!(n > 0, "watch closed stdout early");
        serde_json::from_str(&line).expect("stdout line is not valid JSON")
    }

    /// Close stdin and wait for a clean exit.
    fn finish(mut self) {
        drop(self.stdin.take());
        let status = self.child.wait().unwrap();
        assert!(status.success(), "watch exited with {}", status);
    }
}

fn metric<'a>(data: &'a Value, name: &str) -> &'a Value {
    data["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["Name"] == name)
        .unwrap_or_else(|| panic!("metric {} not found", name))
}

// ── init / config ────────────────────────────────────────────────────────────

#[test]
fn test_init_creates_config_file() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir).arg("init").assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["command"], "init");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_init_keeps_existing_settings_without_force() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["config", "set", "refresh_secs", "15"])
        .assert()
        .success();
    cmd_in(&dir).arg("init").assert().success();

    let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("refresh_secs = 15"));

    cmd_in(&dir).args(["init", "--force"]).assert().success();
    let contents = fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(contents.contains("refresh_secs = 60"));
}

#[test]
fn test_config_set_and_show() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["config", "set", "activity", "Sleeping"])
        .assert()
        .success();

    let assert = cmd_in(&dir).args(["config", "show"]).assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["config"]["dashboard"]["activity"], "Sleeping");
    assert_eq!(json["data"]["config"]["dashboard"]["refresh_secs"], 60);

    cmd_in(&dir)
        .args(["--human", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[dashboard]"));
}

#[test]
fn test_config_set_unknown_key_fails_with_envelope() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["config", "set", "theme", "dark"])
        .assert()
        .failure();
    let json = parse_stderr_json(&assert);
    assert_eq!(json["status"], "error");
    assert_eq!(json["command"], "config");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("unknown config key")
    );
}

// ── thresholds ───────────────────────────────────────────────────────────────

#[test]
fn test_thresholds_for_exercising() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["thresholds", "--activity", "Exercising"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["activity_state"], "Exercising");
    assert_eq!(
        json["data"]["thresholds"]["heart_rate"]["good"],
        serde_json::json!([100, 180])
    );
}

#[test]
fn test_thresholds_unknown_falls_back_to_resting() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["thresholds", "--activity", "Dancing"])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["activity_state"], "Resting");
    assert_eq!(
        json["data"]["thresholds"]["blood_pressure"]["warning"],
        serde_json::json!([121, 140])
    );
}

#[test]
fn test_thresholds_human() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["-H", "thresholds", "--activity", "Sleeping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thresholds (Sleeping)"))
        .stdout(predicate::str::contains("50-70"));
}

// ── dashboard ────────────────────────────────────────────────────────────────

#[test]
fn test_dashboard_uses_mock_data_by_default() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir).arg("dashboard").assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["command"], "dashboard");
    assert_eq!(json["data"]["activity_state"], "Resting");
    assert_eq!(json["data"]["overall"], "Good");
    assert_eq!(metric(&json["data"], "Heart Rate")["Status"], "Good");
}

#[test]
fn test_dashboard_classifies_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(
        &dir,
        Some("Resting"),
        &[("Heart Rate", "110 bpm"), ("Blood Pressure", "118 mmHg")],
    );
    let assert = cmd_in(&dir)
        .args(["dashboard", "--source", path.to_str().unwrap()])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(metric(&json["data"], "Heart Rate")["Status"], "Warning");
    assert_eq!(metric(&json["data"], "Blood Pressure")["Status"], "Good");
    assert_eq!(json["data"]["overall"], "Warning");
}

#[test]
fn test_dashboard_activity_flag_overrides_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, Some("Resting"), &[("Heart Rate", "150 bpm")]);
    let assert = cmd_in(&dir)
        .args([
            "dashboard",
            "--source",
            path.to_str().unwrap(),
            "--activity",
            "Exercising",
        ])
        .assert()
        .success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["activity_state"], "Exercising");
    assert_eq!(json["data"]["reported_activity"], "Resting");
    assert_eq!(json["data"]["overall"], "Good");
}

#[test]
fn test_dashboard_source_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, None, &[("Heart Rate", "200 bpm")]);
    cmd_in(&dir)
        .args(["config", "set", "source", path.to_str().unwrap()])
        .assert()
        .success();

    let assert = cmd_in(&dir).arg("dashboard").assert().success();
    let json = parse_json(&assert);
    assert_eq!(json["data"]["overall"], "Critical");
}

#[test]
fn test_dashboard_custom_metric_is_appended() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["dashboard", "--custom", "Glucose:70-140:141-180"])
        .assert()
        .success();
    let json = parse_json(&assert);
    let glucose = metric(&json["data"], "Glucose");
    assert_eq!(glucose["Status"], "Error");
    assert_eq!(glucose["Value"], "0 units");
    assert_eq!(json["data"]["custom_count"], 1);
    assert_eq!(json["data"]["overall"], "Critical");
    let names: Vec<&str> = json["data"]["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["Name"].as_str().unwrap())
        .collect();
    assert_eq!(names.last(), Some(&"Glucose"));
}

#[test]
fn test_dashboard_remove_metric() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["dashboard", "--remove", "Steps", "--remove", "Nope"])
        .assert()
        .success();
    let json = parse_json(&assert);
    let names: Vec<&str> = json["data"]["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["Name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Heart Rate", "Blood Pressure"]);
}

#[test]
fn test_dashboard_rejects_malformed_custom_range() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["dashboard", "--custom", "Glucose:high:141-180"])
        .assert()
        .failure();
    let json = parse_stderr_json(&assert);
    assert_eq!(json["status"], "error");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("invalid range")
    );
}

#[test]
fn test_dashboard_bad_snapshot_value_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, None, &[("Heart Rate", "fast")]);
    cmd_in(&dir)
        .args(["dashboard", "--source", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid metric value"));
}

#[test]
fn test_dashboard_simulate_keeps_units() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["dashboard", "--simulate"])
        .assert()
        .success();
    let json = parse_json(&assert);
    let hr = metric(&json["data"], "Heart Rate")["Value"].as_str().unwrap().to_string();
    assert!(hr == "52 bpm" || hr == "92 bpm", "unexpected drift: {}", hr);
}

#[test]
fn test_dashboard_human_output() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["--human", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Health Dashboard"))
        .stdout(predicate::str::contains("Heart Rate"))
        .stdout(predicate::str::contains("Daily goal is 8000 steps"));
}

// ── watch ────────────────────────────────────────────────────────────────────

#[test]
fn test_watch_processes_stdin_commands() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, Some("Resting"), &[("Heart Rate", "72 bpm")]);
    let assert = cmd_in(&dir)
        .args([
            "watch",
            "--source",
            path.to_str().unwrap(),
            "--interval",
            "3600",
        ])
        .write_stdin("add Resting Glucose 70-140 141-180\nremove Steps\nbogus\nquit\n")
        .assert()
        .success();

    let lines = parse_json_lines(&assert);
    assert_eq!(lines.len(), 4);

    assert_eq!(lines[0]["command"], "watch");
    assert_eq!(lines[0]["data"]["overall"], "Good");

    assert_eq!(lines[1]["command"], "add");
    assert_eq!(lines[1]["data"]["metric"]["Name"], "Resting Glucose");
    assert_eq!(lines[1]["data"]["metric"]["Status"], "Error");

    assert_eq!(lines[2]["command"], "remove");
    assert_eq!(lines[2]["data"]["removed"], false);

    assert_eq!(lines[3]["status"], "error");
    assert_eq!(lines[3]["error"]["code"], "invalid_command");
}

#[test]
fn test_watch_refresh_keeps_custom_metrics() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, None, &[("Heart Rate", "72 bpm")]);
    let assert = cmd_in(&dir)
        .args(["watch", "--source", path.to_str().unwrap(), "--interval", "3600"])
        .write_stdin("add Glucose 70-140 141-180\nrefresh\nremove Glucose\nshow\n")
        .assert()
        .success();

    let lines = parse_json_lines(&assert);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2]["command"], "refresh");
    assert_eq!(lines[2]["data"]["custom_count"], 1);
    assert_eq!(lines[2]["data"]["overall"], "Critical");
    assert_eq!(lines[3]["data"]["removed"], true);
    assert_eq!(lines[4]["command"], "show");
    assert_eq!(lines[4]["data"]["overall"], "Good");
}

#[test]
fn test_watch_invalid_add_is_reported_not_fatal() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["watch", "--interval", "3600"])
        .write_stdin("add Glucose 140-70 141-180\nadd Glucose\nquit\n")
        .assert()
        .success();

    let lines = parse_json_lines(&assert);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1]["error"]["code"], "invalid_metric");
    assert!(
        lines[1]["error"]["message"]
            .as_str()
            .unwrap()
            .contains("reversed range")
    );
    assert_eq!(lines[2]["error"]["code"], "invalid_command");
}

#[test]
fn test_watch_missing_source_fails_fast() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    cmd_in(&dir)
        .args(["watch", "--source", missing.to_str().unwrap()])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read snapshot"));
}

#[test]
fn test_watch_failed_refresh_keeps_previous_metrics() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, Some("Resting"), &[("Heart Rate", "130 bpm")]);
    let mut watch = LiveWatch::start(
        &dir,
        &["--source", path.to_str().unwrap(), "--interval", "3600"],
    );

    let first = watch.next_json();
    assert_eq!(first["command"], "watch");
    assert_eq!(metric(&first["data"], "Heart Rate")["Status"], "Error");

    fs::write(&path, "{ not json").unwrap();
    watch.send("refresh");
    let failed = watch.next_json();
    assert_eq!(failed["status"], "error");
    assert_eq!(failed["command"], "refresh");
    assert_eq!(failed["error"]["code"], "refresh_failed");

    watch.send("show");
    let shown = watch.next_json();
    assert_eq!(shown["command"], "show");
    assert_eq!(shown["data"]["metrics"], first["data"]["metrics"]);
    assert_eq!(shown["data"]["overall"], "Critical");

    watch.send("quit");
    watch.finish();
}

#[test]
fn test_watch_timer_tick_refreshes() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, None, &[("Heart Rate", "72 bpm")]);
    let mut watch = LiveWatch::start(
        &dir,
        &["--source", path.to_str().unwrap(), "--interval", "1"],
    );

    let first = watch.next_json();
    assert_eq!(first["command"], "watch");
    assert_eq!(metric(&first["data"], "Heart Rate")["Value"], "72 bpm");

    // No stdin input; the next line can only come from the timer
    let staged = dir.path().join("next.json");
    fs::write(&staged, common::snapshot_json(None, &[("Heart Rate", "110 bpm")])).unwrap();
    fs::rename(&staged, &path).unwrap();
    let ticked = watch.next_json();
    assert_eq!(ticked["command"], "watch");
    assert_eq!(ticked["status"], "ok");
    assert_eq!(metric(&ticked["data"], "Heart Rate")["Value"], "110 bpm");
    assert_eq!(ticked["data"]["overall"], "Warning");

    watch.finish();
}

#[test]
fn test_watch_survives_non_utf8_input() {
    let dir = TempDir::new().unwrap();
    let assert = cmd_in(&dir)
        .args(["watch", "--interval", "3600"])
        .write_stdin(b"show\n\xff\xfe\nshow\nquit\n".to_vec())
        .assert()
        .success();

    let lines = parse_json_lines(&assert);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["command"], "show");
    assert_eq!(lines[2]["status"], "error");
    assert_eq!(lines[2]["error"]["code"], "invalid_command");
    assert_eq!(lines[3]["command"], "show");
}

#[test]
fn test_watch_rejects_interval_beyond_one_day() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["watch", "--interval", "18446744073709551615"])
        .write_stdin("show\nquit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval must be between 1 and 86400"));
}

#[test]
fn test_config_set_rejects_huge_refresh_secs() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["config", "set", "refresh_secs", "86401"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refresh_secs must be between"));
}

#[test]
fn test_watch_rejects_zero_interval() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["watch", "--interval", "0"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval"));
}

// ── completions ──────────────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cmd_in(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vitalboard"));
}
