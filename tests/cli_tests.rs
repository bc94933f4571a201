//! Binary-level tests for the combine-code command

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("combine-code").expect("binary exists");
    cmd.env_remove("COMBINE_CODE_ROOT")
        .env_remove("COMBINE_CODE_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_archives_explicit_root_to_explicit_output() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir_all(project.join("src")).unwrap();
    fs::write(project.join("src/main.py"), "print('hi')\n").unwrap();
    let out = tmp.path().join("archive.txt");

    cmd()
        .arg("--root")
        .arg(&project)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived 1 files"));

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "=== src/main.py ===\nprint('hi')\n\n"
    );
}

#[test]
fn test_root_from_environment() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.py"), "a = 1\n").unwrap();

    cmd()
        .env("COMBINE_CODE_ROOT", tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("full_project_source.txt").exists());
}

#[test]
fn test_missing_root_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("archive.txt");

    cmd()
        .arg("--root")
        .arg(tmp.path().join("missing"))
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    assert!(!out.exists());
}

#[test]
fn test_skipped_files_still_exit_zero() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.ipynb"), "{").unwrap();
    fs::write(tmp.path().join("ok.py"), "ok = True\n").unwrap();

    cmd()
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 unreadable"));
}
