use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    Command::cargo_bin("posts-cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn create_requires_title() {
    Command::cargo_bin("posts-cli")
        .unwrap()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--title"));
}

#[test]
fn unreachable_server_fails() {
    Command::cargo_bin("posts-cli")
        .unwrap()
        .args(["--server", "http://127.0.0.1:9", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list posts"));
}
