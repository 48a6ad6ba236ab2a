use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

const TODAY: &str = "2025-01-01";

fn run_raw(home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("dialwindow")
        .env("XDG_CONFIG_HOME", home)
        .env("TZ", "UTC")
        .env_remove("RUST_LOG")
        .args(["--today", TODAY])
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = run_raw(home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    serde_json::from_str(&run_cmd(home, &full)).expect("parse json")
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_vec_pretty(value).expect("json")).expect("write file");
    path
}

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("dialwindow.toml");
    fs::write(
        &path,
        concat!(
            "ivr_profiles = [\"sales\", \"support\"]\n",
            "[[caller_ids]]\n",
            "id = \"pn-1\"\n",
            "number = \"+1 (555) 010-0001\"\n",
            "[[caller_ids]]\n",
            "id = \"pn-2\"\n",
            "number = \"+1 (555) 010-0002\"\n",
            "status = \"inactive\"\n",
        ),
    )
    .expect("write config");
    path
}

fn complete_draft() -> Value {
    json!({
        "name": "Spring renewals",
        "ivrProfile": "sales",
        "callerId": "pn-1",
        "startDate": "2025-01-06",
        "endDate": "2025-02-06",
        "timezone": "America/Chicago",
        "weeklySchedule": {
            "monday": { "enabled": true, "startTime": "09:00", "endTime": "17:00" },
            "wednesday": { "enabled": true, "startTime": "10:00", "endTime": "16:00" }
        },
        "maxAttempts": 3,
        "retryInterval": "01:00:00",
        "concurrencyLimit": 10
    })
}

#[test]
fn cli_new_derives_weekdays_from_dates() {
    let temp = TempDir::new().expect("temp dir");
    let draft = run_cmd_json(
        temp.path(),
        &["new", "--name", "Trial", "--start", "2025-06-02", "--end", "2025-06-03"],
    );
    assert_eq!(draft["name"], "Trial");
    assert_eq!(draft["timezone"], "UTC");
    assert_eq!(draft["maxAttempts"], 1);
    assert_eq!(draft["retryInterval"], "00:00:00");
    assert_eq!(draft["weeklySchedule"]["monday"]["enabled"], true);
    assert_eq!(draft["weeklySchedule"]["tuesday"]["enabled"], true);
    assert_eq!(draft["weeklySchedule"]["wednesday"]["enabled"], false);
    assert_eq!(draft["weeklySchedule"]["wednesday"]["startTime"], "09:00");
}

#[test]
fn cli_validate_step_one_reports_identity_fields() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_json(temp.path(), "draft.json", &json!({}));
    let output = run_raw(
        temp.path(),
        &["--json", "validate", path.to_str().expect("path"), "--step", "1"],
    );
    assert_eq!(output.status.code(), Some(3));
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["valid"], false);
    assert_eq!(report["step"], 1);
    let errors = report["errors"].as_object().expect("errors");
    let mut keys: Vec<&str> = errors.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["ivr", "name", "phoneNumber"]);
}

#[test]
fn cli_validate_reports_date_problems() {
    let temp = TempDir::new().expect("temp dir");
    let mut draft = complete_draft();
    draft["startDate"] = json!("2025-01-10");
    draft["endDate"] = json!("2025-01-09");
    let path = write_json(temp.path(), "draft.json", &draft);
    let output = run_raw(
        temp.path(),
        &["--json", "validate", path.to_str().expect("path"), "--step", "2"],
    );
    assert_eq!(output.status.code(), Some(3));
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["errors"]["endDate"], "End date must be after start date");

    draft["endDate"] = json!("2026-01-11");
    let path = write_json(temp.path(), "draft.json", &draft);
    let output = run_raw(
        temp.path(),
        &["--json", "validate", path.to_str().expect("path")],
    );
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(
        report["errors"]["endDate"],
        "End date cannot exceed 1 year from start date"
    );
    assert!(report["step"].is_null());
}

#[test]
fn cli_validate_accepts_complete_draft() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_json(temp.path(), "draft.json", &complete_draft());
    let stdout = run_cmd(temp.path(), &["validate", path.to_str().expect("path")]);
    assert_eq!(stdout.trim(), "valid");
}

#[test]
fn cli_submit_resolves_caller_number() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_config(temp.path());
    let path = write_json(temp.path(), "draft.json", &complete_draft());
    let submission = run_cmd_json(
        temp.path(),
        &[
            "--config",
            config.to_str().expect("config"),
            "submit",
            path.to_str().expect("path"),
        ],
    );
    assert_eq!(submission["name"], "Spring renewals");
    assert_eq!(submission["callerNumber"], "+1 (555) 010-0001");
    assert_eq!(submission["weeklySchedule"]["monday"]["enabled"], true);
}

#[test]
fn cli_submit_rejects_unknown_ivr_profile() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_config(temp.path());
    let mut draft = complete_draft();
    draft["ivrProfile"] = json!("collections");
    let path = write_json(temp.path(), "draft.json", &draft);
    let output = run_raw(
        temp.path(),
        &[
            "--json",
            "--config",
            config.to_str().expect("config"),
            "submit",
            path.to_str().expect("path"),
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let report: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(report["errors"]["ivr"], "Unknown IVR profile");
}

#[test]
fn cli_derive_single_monday() {
    let temp = TempDir::new().expect("temp dir");
    let report = run_cmd_json(
        temp.path(),
        &["derive", "--start", "2025-06-02", "--end", "2025-06-02"],
    );
    assert_eq!(report["weekdays"], json!(["monday"]));
    assert_eq!(report["indices"], json!([1]));

    let stdout = run_cmd(
        temp.path(),
        &["derive", "--start", "2025-06-02", "--end", "2025-06-20"],
    );
    assert_eq!(
        stdout.trim(),
        "monday tuesday wednesday thursday friday saturday sunday"
    );
}

#[test]
fn cli_derive_rejects_bad_date() {
    let temp = TempDir::new().expect("temp dir");
    let output = run_raw(
        temp.path(),
        &["derive", "--start", "06/02/2025", "--end", "2025-06-02"],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_time_conversions() {
    let temp = TempDir::new().expect("temp dir");
    assert_eq!(run_cmd(temp.path(), &["time", "to12", "09:00"]).trim(), "9:00 AM");
    assert_eq!(run_cmd(temp.path(), &["time", "to24", "12:30 AM"]).trim(), "00:30");
    assert_eq!(run_cmd(temp.path(), &["time", "to24", "noon"]).trim(), "noon");
    let slots = run_cmd_json(temp.path(), &["time", "common"]);
    assert_eq!(slots.as_array().expect("array").len(), 48);
    assert_eq!(slots[0]["output"], "00:00");
}

#[test]
fn cli_clocks_filters_zones() {
    let temp = TempDir::new().expect("temp dir");
    let clocks = run_cmd_json(temp.path(), &["clocks", "--zone", "UTC"]);
    let items = clocks.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "UTC");
    assert!(items[0]["time"].as_str().expect("time").ends_with('M'));

    let output = run_raw(temp.path(), &["clocks", "--zone", "Mars/Olympus"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_clocks_watch_stops_after_ticks() {
    let temp = TempDir::new().expect("temp dir");
    let stdout = run_cmd(
        temp.path(),
        &[
            "clocks",
            "--zone",
            "UTC",
            "--watch",
            "--ticks",
            "2",
            "--interval-ms",
            "5",
        ],
    );
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn cli_replay_walks_both_steps_and_submits() {
    let temp = TempDir::new().expect("temp dir");
    let script = json!({
        "actions": [
            { "action": "next" },
            { "action": "set", "update": { "field": "name", "value": "Win-back" } },
            { "action": "set", "update": { "field": "callerId", "value": "pn-1" } },
            { "action": "set", "update": { "field": "ivrProfile", "value": "sales" } },
            { "action": "next" },
            { "action": "set", "update": { "field": "startDate", "value": "2025-06-02" } },
            { "action": "set", "update": { "field": "endDate", "value": "2025-06-04" } },
            { "action": "set", "update": {
                "field": "dayStartTime",
                "value": { "day": "tuesday", "time": "18:00" }
            } },
            { "action": "submit" },
            { "action": "set", "update": {
                "field": "dayStartTime",
                "value": { "day": "tuesday", "time": "08:00" }
            } },
            { "action": "submit" }
        ]
    });
    let path = write_json(temp.path(), "script.json", &script);
    let report = run_cmd_json(temp.path(), &["replay", path.to_str().expect("path")]);
    let trace = report["trace"].as_array().expect("trace");
    assert_eq!(trace.len(), 11);

    assert_eq!(trace[0]["result"]["outcome"], "blocked");
    assert_eq!(trace[0]["result"]["errors"], 3);
    assert_eq!(trace[0]["errors"]["name"], "Campaign name is required");
    assert!(trace[1]["errors"].get("name").is_none());

    assert_eq!(trace[4]["result"]["outcome"], "advanced");
    assert_eq!(trace[4]["step"], 2);
    assert_eq!(trace[6]["result"]["derived"], true);

    assert_eq!(trace[8]["result"]["outcome"], "rejected");
    assert_eq!(
        trace[8]["errors"]["schedule-tuesday"],
        "Start time must be before end time"
    );
    assert!(trace[9]["errors"].get("schedule-tuesday").is_none());
    assert_eq!(trace[10]["result"]["outcome"], "submitted");

    assert_eq!(report["cancelled"], false);
    assert_eq!(report["submission"]["name"], "Win-back");
    let schedule = &report["submission"]["weeklySchedule"];
    assert_eq!(schedule["monday"]["enabled"], true);
    assert_eq!(schedule["tuesday"]["enabled"], true);
    assert_eq!(schedule["wednesday"]["enabled"], true);
    assert_eq!(schedule["thursday"]["enabled"], false);
}

#[test]
fn cli_replay_cancel_discards_draft() {
    let temp = TempDir::new().expect("temp dir");
    let script = json!({
        "draft": complete_draft(),
        "actions": [
            { "action": "cancel" },
            { "action": "submit" }
        ]
    });
    let path = write_json(temp.path(), "script.json", &script);
    let report = run_cmd_json(temp.path(), &["replay", path.to_str().expect("path")]);
    assert_eq!(report["cancelled"], true);
    assert!(report["submission"].is_null());
    assert!(report["draft"].is_null());
    assert_eq!(report["trace"].as_array().expect("trace").len(), 1);
}

#[test]
fn cli_rejects_invalid_config() {
    let temp = TempDir::new().expect("temp dir");
    let config = temp.path().join("bad.toml");
    fs::write(&config, "default_timezone = \"Mars/Olympus\"\n").expect("write config");
    let output = run_raw(
        temp.path(),
        &["--config", config.to_str().expect("config"), "derive", "--start", "2025-06-02", "--end", "2025-06-03"],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("load config"));
}

#[test]
fn cli_clocks_watch_rejects_zero_ticks() {
    let temp = TempDir::new().expect("temp dir");
    let output = run_raw(
        temp.path(),
        &["clocks", "--zone", "UTC", "--watch", "--ticks", "0"],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn cli_completions_skip_config_loading() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing.toml");
    let stdout = run_cmd(
        temp.path(),
        &["--config", missing.to_str().expect("config"), "completions", "bash"],
    );
    assert!(stdout.contains("dialwindow"));
}

#[test]
fn cli_submit_trims_padded_caller_id() {
    let temp = TempDir::new().expect("temp dir");
    let config = write_config(temp.path());
    let mut draft = complete_draft();
    draft["callerId"] = json!(" pn-1 ");
    draft["ivrProfile"] = json!("sales ");
    let path = write_json(temp.path(), "draft.json", &draft);
    let submission = run_cmd_json(
        temp.path(),
        &[
            "--config",
            config.to_str().expect("config"),
            "submit",
            path.to_str().expect("path"),
        ],
    );
    assert_eq!(submission["callerId"], "pn-1");
    assert_eq!(submission["ivrProfile"], "sales");
    assert_eq!(submission["callerNumber"], "+1 (555) 010-0001");
}
