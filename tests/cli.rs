use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn cadastra(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cadastra").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env("CADASTRA_HOME", data_dir);
    cmd
}

fn list_output(data_dir: &Path, args: &[&str]) -> String {
    let output = cadastra(data_dir).arg("list").args(args).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

/// Ids are the last column of `list` rows.
fn id_of(data_dir: &Path, name: &str) -> String {
    list_output(data_dir, &[])
        .lines()
        .find(|line| line.contains(name))
        .and_then(|line| line.split_whitespace().last())
        .map(str::to_string)
        .unwrap_or_else(|| panic!("{} not listed", name))
}

#[test]
fn empty_registry_lists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn add_then_list() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["add", "Ana Silva", "ana@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record created: Ana Silva"));

    cadastra(dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana Silva").and(predicate::str::contains("ana@x.com")));

    assert!(dir.path().join("storage.json").exists());
}

#[test]
fn invalid_input_is_rejected_with_field_errors() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["add", "Ana123", "bad-email"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Name may only contain letters and spaces")
                .and(predicate::str::contains("Invalid email")),
        );

    assert!(!dir.path().join("storage.json").exists());
}

#[test]
fn edit_keeps_unspecified_fields() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["add", "Ana Silva", "ana@x.com"])
        .assert()
        .success();
    let id = id_of(dir.path(), "Ana Silva");

    cadastra(dir.path())
        .args(["edit", &id, "--name", "Ana Souza"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record updated: Ana Souza"));

    let listing = list_output(dir.path(), &[]);
    assert!(listing.contains("Ana Souza"));
    assert!(listing.contains("ana@x.com"));
    assert!(listing.contains(&id));
}

#[test]
fn edit_of_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["edit", "nope", "--name", "Ana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found: nope"));
}

#[test]
fn delete_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["add", "Ana", "ana@x.com"])
        .assert()
        .success();
    let id = id_of(dir.path(), "Ana");

    cadastra(dir.path())
        .args(["rm", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record removed: Ana"));
    cadastra(dir.path()).args(["rm", &id]).assert().success();

    assert!(list_output(dir.path(), &[]).contains("No records found."));
}

#[test]
fn alpha_and_search_shape_the_listing() {
    let dir = tempfile::tempdir().unwrap();
    for (name, email) in [
        ("Zeca", "zeca@team.com"),
        ("Álvaro", "alvaro@team.com"),
        ("Bruno", "bruno@solo.com"),
    ] {
        cadastra(dir.path())
            .args(["add", name, email])
            .assert()
            .success();
    }

    let registration = list_output(dir.path(), &[]);
    assert!(registration.find("Zeca").unwrap() < registration.find("Álvaro").unwrap());

    let alpha = list_output(dir.path(), &["--alpha"]);
    let positions: Vec<usize> = ["Álvaro", "Bruno", "Zeca"]
        .iter()
        .map(|n| alpha.find(n).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(alpha.contains("name (A-Z)"));

    cadastra(dir.path())
        .args(["search", "TEAM"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Zeca")
                .and(predicate::str::contains("Álvaro"))
                .and(predicate::str::contains("Bruno").not()),
        );
}

#[test]
fn data_dir_flag_overrides_environment() {
    let env_dir = tempfile::tempdir().unwrap();
    let flag_dir = tempfile::tempdir().unwrap();
    cadastra(env_dir.path())
        .args(["add", "Ana", "ana@x.com", "--data-dir"])
        .arg(flag_dir.path())
        .assert()
        .success();

    assert!(flag_dir.path().join("storage.json").exists());
    assert!(!env_dir.path().join("storage.json").exists());
}

#[test]
fn config_set_and_show() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["config", "storage-key", "@custom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("storage-key set to @custom"));

    cadastra(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("storage-key = @custom")
                .and(predicate::str::contains("dark-mode = true")),
        );

    cadastra(dir.path())
        .args(["add", "Ana", "ana@x.com"])
        .assert()
        .success();
    let stored = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    assert!(stored.contains("@custom"));
}

#[test]
fn unknown_config_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["config", "colour"])
        .assert()
        .failure();
}

#[test]
fn data_file_cannot_point_at_the_config() {
    let dir = tempfile::tempdir().unwrap();
    cadastra(dir.path())
        .args(["config", "dark-mode", "false"])
        .assert()
        .success();
    cadastra(dir.path())
        .args(["config", "data-file", "config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data-file must be a plain file name"));

    cadastra(dir.path())
        .args(["add", "Ana", "ana@x.com"])
        .assert()
        .success();

    cadastra(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("data-file = storage.json")
                .and(predicate::str::contains("dark-mode = false")),
        );
    assert!(list_output(dir.path(), &[]).contains("Ana"));
}
