use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_chronicle"))
}

/// Isolated XDG homes plus a scratch directory for backups.
struct Env {
    root: TempDir,
}

impl Env {
    fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        for dir in ["config", "data", "work"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create dir");
        }
        Self { root }
    }

    fn config_home(&self) -> PathBuf {
        self.root.path().join("config")
    }

    fn data_home(&self) -> PathBuf {
        self.root.path().join("data")
    }

    fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    fn store_path(&self) -> PathBuf {
        self.data_home().join("chronicle").join("store.json")
    }

    fn config_path(&self) -> PathBuf {
        self.config_home().join("chronicle").join("config.toml")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.args(args)
            .current_dir(self.work_dir())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env_remove("CHRONICLE_STORE")
            .env_remove("CHRONICLE_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("run chronicle")
    }

    fn run_ok(&self, args: &[&str]) -> Output {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "`chronicle {}` failed: stdout={}, stderr={}",
            args.join(" "),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.run_ok(args);
        serde_json::from_slice(&output.stdout).expect("parse json output")
    }

    fn init(&self) {
        self.run_ok(&["init"]);
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn event_titles(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("events array")
        .iter()
        .filter_map(|e| e.get("title").and_then(|t| t.as_str()).map(String::from))
        .collect()
}

#[test]
fn test_cli_quickstart_output() {
    let env = Env::new();
    let output = env.run_ok(&[]);
    let out = stdout(&output);
    assert!(out.contains("Quickstart"));
    assert!(out.contains("chronicle init"));
}

#[test]
fn test_cli_init_writes_config_and_store() {
    let env = Env::new();
    let output = env.run_ok(&["init", "--budget-bytes", "100000"]);
    assert!(stdout(&output).contains("status=ok"));

    assert!(env.store_path().exists(), "store file should exist");
    let contents = std::fs::read_to_string(env.config_path()).expect("read config");
    let value: toml::Value = contents.parse().expect("parse config");
    let store = value.get("store").expect("store section");
    assert_eq!(
        store.get("path").and_then(|p| p.as_str()),
        Some(env.store_path().to_string_lossy().as_ref())
    );
    assert_eq!(
        store.get("budget_bytes").and_then(|b| b.as_integer()),
        Some(100000)
    );
    assert_eq!(
        store.get("probe").and_then(|p| p.as_str()),
        Some("memoized")
    );

    // A second init needs --force.
    let again = env.run(&["init"]);
    assert_eq!(again.status.code(), Some(4));
    assert!(stderr(&again).contains("--force"));
    env.run_ok(&["init", "--force"]);
}

#[test]
fn test_cli_missing_store_message() {
    let env = Env::new();
    let output = env.run(&["events", "list"]);
    assert_eq!(output.status.code(), Some(3));
    let err = stderr(&output);
    assert!(err.contains("No store found at"));
    assert!(err.contains(&*env.store_path().to_string_lossy()));
    assert!(err.contains("chronicle init"));
}

#[test]
fn test_cli_store_flag_overrides_config() {
    let env = Env::new();
    env.init();
    let other = env.work_dir().join("other.json");
    std::fs::write(&other, "{}").expect("write other store");
    let other_str = other.to_string_lossy().to_string();

    env.run_ok(&[
        "--store", &other_str, "categories", "add", "Errands", "--color", "bg-orange-500",
    ]);

    let category_names = |value: &Value| -> Vec<String> {
        value["categories"]
            .as_array()
            .expect("categories")
            .iter()
            .filter_map(|c| c["name"].as_str().map(String::from))
            .collect()
    };
    let overridden = env.json(&["--store", &other_str, "categories", "list", "--json"]);
    assert!(category_names(&overridden).contains(&"Errands".to_string()));
    let configured = env.json(&["categories", "list", "--json"]);
    assert!(!category_names(&configured).contains(&"Errands".to_string()));
}

#[test]
fn test_cli_fresh_store_shows_defaults() {
    let env = Env::new();
    env.init();
    let events = env.json(&["events", "list", "--json"]);
    assert_eq!(event_titles(&events), vec!["Project Kickoff", "Kyoto Trip"]);

    let journal = env.json(&["events", "list", "--json", "--journal"]);
    assert_eq!(event_titles(&journal), vec!["Kyoto Trip"]);

    // Reading never writes defaults back.
    let raw = std::fs::read_to_string(env.store_path()).expect("read store");
    assert_eq!(raw.trim(), "{}");
}

#[test]
fn test_cli_export_clear_import_round_trip() {
    let env = Env::new();
    env.init();

    let added = env.run_ok(&[
        "-q",
        "events",
        "add",
        "--title",
        "Dentist",
        "--start",
        "2030-03-04",
        "--category",
        "Health",
        "--reminder",
        "1-day-before",
    ]);
    let id = stdout(&added).trim().to_string();
    assert!(!id.is_empty());

    let backup = env.work_dir().join("backup.json");
    let backup_str = backup.to_string_lossy().to_string();
    env.run_ok(&["export", "--output", &backup_str]);
    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&backup).expect("read backup"))
            .expect("parse backup");
    assert!(document.get("EVENTS").is_some());
    assert!(document.get("CATEGORIES").is_none());

    env.run_ok(&["clear", "--yes"]);
    let events = env.json(&["events", "list", "--json"]);
    assert!(!event_titles(&events).contains(&"Dentist".to_string()));

    let imported = env.run_ok(&["import", &backup_str]);
    assert!(stdout(&imported).contains("EVENTS"));
    let events = env.json(&["events", "list", "--json"]);
    assert!(events
        .as_array()
        .expect("events")
        .iter()
        .any(|e| e["id"] == Value::String(id.clone())));
}

#[test]
fn test_cli_export_to_stdout_and_default_name() {
    let env = Env::new();
    env.init();
    env.run_ok(&["categories", "add", "Garden"]);

    let output = env.run_ok(&["export", "--output", "-"]);
    let document: Value = serde_json::from_slice(&output.stdout).expect("parse backup");
    assert!(document["CATEGORIES"].is_array());

    env.run_ok(&["export"]);
    let names: Vec<String> = std::fs::read_dir(env.work_dir())
        .expect("read work dir")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert!(names
        .iter()
        .any(|n| n.starts_with("chronicle-backup-") && n.ends_with(".json")));
}

#[test]
fn test_cli_import_rejects_invalid_backup() {
    let env = Env::new();
    env.init();
    let bad = env.work_dir().join("bad.json");
    std::fs::write(&bad, "not json").expect("write bad backup");

    let before = std::fs::read_to_string(env.store_path()).expect("read store");
    let output = env.run(&["import", &bad.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(4));
    let after = std::fs::read_to_string(env.store_path()).expect("read store");
    assert_eq!(before, after);

    let missing = env.run(&["import", "nope.json"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_cli_import_reports_unknown_fields() {
    let env = Env::new();
    env.init();
    let file = env.work_dir().join("partial.json");
    std::fs::write(&file, r#"{"EVENTS": [], "BOGUS": 123}"#).expect("write backup");

    let output = env.run_ok(&["import", &file.to_string_lossy()]);
    assert!(stderr(&output).contains("BOGUS"));
    let events = env.json(&["events", "list", "--json"]);
    assert_eq!(events, Value::Array(Vec::new()));
    // Entities absent from the backup keep their defaults.
    let categories = env.json(&["categories", "list", "--json"]);
    assert_eq!(categories["categories"].as_array().map(Vec::len), Some(5));
}

#[test]
fn test_cli_budget_exceeded_exits_storage_full() {
    let env = Env::new();
    env.run_ok(&["init", "--budget-bytes", "300"]);
    let output = env.run(&[
        "events", "add", "--title", "Too big", "--start", "2030-01-01",
    ]);
    assert_eq!(output.status.code(), Some(7));
    let err = stderr(&output);
    assert!(err.contains("Storage is full"), "stderr was: {}", err);

    let raw = std::fs::read_to_string(env.store_path()).expect("read store");
    assert!(!raw.contains("Too big"));
}

#[test]
fn test_cli_usage_reports_entities() {
    let env = Env::new();
    env.init();
    env.run_ok(&["categories", "add", "Garden"]);

    let usage = env.json(&["usage", "--json"]);
    assert!(usage["usedBytes"].as_u64().unwrap_or(0) > 0);
    assert_eq!(usage["totalBytes"].as_u64(), Some(5 * 1024 * 1024));
    assert_eq!(usage["nearFull"], Value::Bool(false));
    let entities = usage["entities"].as_array().expect("entities");
    assert!(entities.iter().any(|e| e["entity"] == "CATEGORIES"));
}

#[test]
fn test_cli_clear_requires_confirmation_when_piped() {
    let env = Env::new();
    env.init();
    let output = env.run(&["clear"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("--yes"));
}

#[test]
fn test_cli_category_delete_leaves_uncategorized_references() {
    let env = Env::new();
    env.init();

    let output = env.run_ok(&["categories", "delete", "Travel"]);
    assert!(stderr(&output).contains("Uncategorized"));

    let categories = env.json(&["categories", "list", "--json"]);
    let orphans: Vec<&str> = categories["orphanedReferences"]
        .as_array()
        .expect("orphans")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(orphans, vec!["Travel"]);

    let duplicate = env.run(&["categories", "add", "Work"]);
    assert_eq!(duplicate.status.code(), Some(4));
    let missing = env.run(&["categories", "delete", "Nope"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_cli_reminders_and_dismiss() {
    let env = Env::new();
    env.init();
    let added = env.run_ok(&[
        "-q",
        "events",
        "add",
        "--title",
        "Flight",
        "--start",
        "2031-07-10",
        "--reminder",
        "3-days-before",
    ]);
    let id = stdout(&added).trim().to_string();

    let early = env.json(&["reminders", "--json", "--on", "2031-07-06"]);
    assert!(!early
        .as_array()
        .expect("reminders")
        .iter()
        .any(|r| r["id"] == Value::String(id.clone())));

    let due = env.json(&["reminders", "--json", "--on", "2031-07-07"]);
    let flight = due
        .as_array()
        .expect("reminders")
        .iter()
        .find(|r| r["id"] == Value::String(id.clone()))
        .cloned()
        .expect("flight reminder due");
    assert_eq!(flight["reminderDate"], "2031-07-07");

    env.run_ok(&["events", "dismiss", &id]);
    let after = env.json(&["reminders", "--json", "--on", "2031-07-07"]);
    assert!(!after
        .as_array()
        .expect("reminders")
        .iter()
        .any(|r| r["id"] == Value::String(id.clone())));
}

#[test]
fn test_cli_event_validation_and_not_found() {
    let env = Env::new();
    env.init();
    let backwards = env.run(&[
        "events", "add", "--title", "Oops", "--start", "2030-01-05", "--end", "2030-01-01",
    ]);
    assert_eq!(backwards.status.code(), Some(4));

    let bad_date = env.run(&["events", "add", "--title", "Oops", "--start", "01/05/2030"]);
    assert_eq!(bad_date.status.code(), Some(4));

    let missing = env.run(&["events", "delete", "does-not-exist"]);
    assert_eq!(missing.status.code(), Some(3));
}

#[test]
fn test_cli_credentials_mask_passwords() {
    let env = Env::new();
    env.init();
    env.run_ok(&[
        "credentials",
        "add",
        "--service",
        "Mail",
        "--email",
        "me@example.com",
        "--password",
        "hunter2-secret",
    ]);

    let masked = env.run_ok(&["credentials", "list"]);
    let out = stdout(&masked);
    assert!(out.contains("Mail"));
    assert!(!out.contains("hunter2-secret"));

    let shown = env.json(&["credentials", "list", "--json", "--show-passwords"]);
    assert!(shown
        .as_array()
        .expect("credentials")
        .iter()
        .any(|c| c["password"] == "hunter2-secret"));
}

#[test]
fn test_cli_profile_set_and_avatar_limit() {
    let env = Env::new();
    env.init();
    env.run_ok(&["profile", "set", "--name", "Ada", "--role", "Engineer", "--ai-key", "k-123"]);
    let profile = env.json(&["profile", "show", "--json"]);
    assert_eq!(profile["name"], "Ada");
    assert_eq!(profile["hasAiApiKey"], Value::Bool(true));
    assert_eq!(profile["hasAvatar"], Value::Bool(false));

    let small = env.work_dir().join("small.png");
    std::fs::write(&small, [0u8; 64]).expect("write avatar");
    env.run_ok(&["profile", "set", "--avatar", &small.to_string_lossy()]);
    let profile = env.json(&["profile", "show", "--json"]);
    assert_eq!(profile["hasAvatar"], Value::Bool(true));

    let big = env.work_dir().join("big.png");
    std::fs::write(&big, vec![0u8; 600_000]).expect("write avatar");
    let output = env.run(&["profile", "set", "--avatar", &big.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("500KB"));

    let empty = env.run(&["profile", "set", "--name", "  "]);
    assert_eq!(empty.status.code(), Some(4));
}

#[test]
fn test_cli_completions() {
    let env = Env::new();
    let output = env.run_ok(&["completions", "bash"]);
    assert!(stdout(&output).contains("chronicle"));
}
