use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("daybook-tasks.json")
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daybook"))
        .args(args)
        .env("DAYBOOK_STORE_PATH", store_path(dir))
        .env("DAYBOOK_CONFIG_PATH", dir.path().join("config.json"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run daybook")
}

fn read_store(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn add_command_persists_task_and_confirms() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        &dir,
        &[
            "add",
            "  Buy milk ",
            "--due",
            "2024-03-15",
            "--priority",
            "high",
            "--category",
            "Shopping",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task Created! ✨: \"Buy milk\" has been added for Mar 15."));
    assert!(stdout.contains("Added task: Buy milk (task-"));

    let stored = read_store(&store_path(&dir));
    assert_eq!(stored["schema_version"], 1);
    let task = &stored["tasks"][0];
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["dueDate"], "2024-03-15");
    assert_eq!(task["priority"], "high");
    assert_eq!(task["category"], "Shopping");
    assert_eq!(task["completed"], false);
    assert_eq!(task["emoji"], "💖");
    assert!(task.get("description").is_none());
}

#[test]
fn add_command_json_outputs_created_task() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir, &["--json", "add", "demo", "--due", "2024-03-15"]);

    assert!(output.status.success());
    let created: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(created["title"], "demo");
    assert_eq!(created["priority"], "medium");
    assert!(created["id"].as_str().unwrap().starts_with("task-"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Task Created!"));
}

#[test]
fn add_command_rejects_missing_title() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir, &["add"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(!store_path(&dir).exists());
}

#[test]
fn add_command_rejects_blank_title_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir, &["add", "   ", "--due", "2024-03-15"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).is_empty());
    assert!(!store_path(&dir).exists());
}

#[test]
fn add_command_rejects_invalid_due_date() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir, &["add", "demo", "--due", "2024-02-30"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - date must be YYYY-MM-DD"));
}

#[test]
fn add_command_rejects_unknown_priority() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir, &["add", "demo", "--priority", "urgent"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("priority must be low, medium or high"));
}

#[test]
fn add_command_keeps_arrival_order_and_unique_ids() {
    let dir = tempfile::tempdir().unwrap();
    for title in ["first", "second", "third"] {
        let output = run(&dir, &["add", title, "--due", "2024-03-15"]);
        assert!(output.status.success());
    }

    let stored = read_store(&store_path(&dir));
    let tasks = stored["tasks"].as_array().unwrap();
    let titles: Vec<&str> = tasks.iter().map(|task| task["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["first", "second", "third"]);

    let mut ids: Vec<&str> = tasks.iter().map(|task| task["id"].as_str().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn notifications_can_be_switched_off() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        &dir,
        &[
            "--config-override",
            "notifications=off",
            "add",
            "quiet",
            "--due",
            "2024-03-15",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Task Created!"));
    assert!(stdout.contains("Added task: quiet"));
}

#[test]
fn config_file_selects_notification_mode() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"notifications": "off"}"#).unwrap();

    let output = run(&dir, &["add", "quiet", "--due", "2024-03-15"]);

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Task Created!"));
}

#[test]
fn broken_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{ nope").unwrap();

    let output = run(&dir, &["add", "demo", "--due", "2024-03-15"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: ignoring config"));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Task Created!"));
}

#[test]
fn invalid_config_override_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&dir, &["--config-override", "theme=noir", "today"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown config field 'theme'"));
}
