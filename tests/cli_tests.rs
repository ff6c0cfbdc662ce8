// End-to-end CLI tests driving the tf binary against a temp project.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_env() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    let mut init = tf_command(temp_dir.path());
    init.arg("init").assert().success();

    temp_dir
}

fn tf_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tf").unwrap();
    cmd.current_dir(dir).env("TASK_FOREST_PROJECT_DIR", dir);
    cmd
}

/// Create a task via the CLI and return its JSON representation.
fn create_task(dir: &Path, title: &str, parent: Option<&str>) -> serde_json::Value {
    let mut cmd = tf_command(dir);
    cmd.arg("task")
        .arg("create")
        .arg(title)
        .arg("--format")
        .arg("json");
    if let Some(parent_id) = parent {
        cmd.arg("--parent").arg(parent_id);
    }

    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_cli_init_creates_project() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("init");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Initialized Task-Forest project"));

    assert!(temp_dir
        .path()
        .join(".task-forest")
        .join("tasks.db")
        .exists());
}

#[test]
fn test_cli_task_create() {
    let temp_dir = setup_test_env();

    let task = create_task(temp_dir.path(), "Test task", None);

    assert_eq!(task["title"], "Test task");
    assert_eq!(task["status"], "pending");
    assert!(task["public_id"].as_str().unwrap().starts_with("tsk_"));
}

#[test]
fn test_cli_task_create_empty_title_fails() {
    let temp_dir = setup_test_env();

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("task").arg("create").arg("   ");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_INPUT"));
}

#[test]
fn test_cli_task_get_not_found() {
    let temp_dir = setup_test_env();

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("task").arg("get").arg("tsk_missing1");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TASK_NOT_FOUND"));
}

#[test]
fn test_cli_task_list() {
    let temp_dir = setup_test_env();

    create_task(temp_dir.path(), "First", None);
    create_task(temp_dir.path(), "Second", None);

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("task").arg("list");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("First"))
        .stdout(predicate::str::contains("Second"));
}

#[test]
fn test_cli_status_change_propagates_to_parent() {
    let temp_dir = setup_test_env();

    let parent = create_task(temp_dir.path(), "Parent", None);
    let parent_id = parent["public_id"].as_str().unwrap();
    let child = create_task(temp_dir.path(), "Child", Some(parent_id));
    let child_id = child["public_id"].as_str().unwrap();

    tf_command(temp_dir.path())
        .arg("task")
        .arg("update")
        .arg(child_id)
        .arg("--status")
        .arg("in_progress")
        .assert()
        .success();

    let mut get_parent = tf_command(temp_dir.path());
    get_parent
        .arg("task")
        .arg("get")
        .arg(parent_id)
        .arg("--format")
        .arg("json");

    get_parent
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"in_progress\""));
}

#[test]
fn test_cli_complete_blocked_by_incomplete_subtask() {
    let temp_dir = setup_test_env();

    let parent = create_task(temp_dir.path(), "Parent", None);
    let parent_id = parent["public_id"].as_str().unwrap();
    create_task(temp_dir.path(), "Child", Some(parent_id));

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("task")
        .arg("update")
        .arg(parent_id)
        .arg("--status")
        .arg("completed");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("PRECONDITION_FAILED"))
        .stderr(predicate::str::contains("subtasks are incomplete"));
}

#[test]
fn test_cli_delete_cascades_and_is_idempotent() {
    let temp_dir = setup_test_env();

    let parent = create_task(temp_dir.path(), "Parent", None);
    let parent_id = parent["public_id"].as_str().unwrap();
    let child = create_task(temp_dir.path(), "Child", Some(parent_id));
    let child_id = child["public_id"].as_str().unwrap();

    tf_command(temp_dir.path())
        .arg("task")
        .arg("delete")
        .arg(parent_id)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": true"));

    tf_command(temp_dir.path())
        .arg("task")
        .arg("get")
        .arg(child_id)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TASK_NOT_FOUND"));

    // Deleting again is still a success.
    tf_command(temp_dir.path())
        .arg("task")
        .arg("delete")
        .arg(parent_id)
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": true"));
}

#[test]
fn test_cli_tree_renders_subtree() {
    let temp_dir = setup_test_env();

    let root = create_task(temp_dir.path(), "Root", None);
    let root_id = root["public_id"].as_str().unwrap();
    let child = create_task(temp_dir.path(), "Child", Some(root_id));
    let child_id = child["public_id"].as_str().unwrap();
    create_task(temp_dir.path(), "Grandchild", Some(child_id));

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("task")
        .arg("tree")
        .arg(root_id)
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Root\""))
        .stdout(predicate::str::contains("\"title\": \"Child\""))
        .stdout(predicate::str::contains("\"title\": \"Grandchild\""));
}

#[test]
fn test_cli_tree_of_unknown_id_prints_placeholder() {
    let temp_dir = setup_test_env();

    let mut cmd = tf_command(temp_dir.path());
    cmd.arg("task")
        .arg("tree")
        .arg("tsk_missing1")
        .arg("--format")
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"subtasks\": []"));
}
