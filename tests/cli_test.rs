use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn tracker_cmd(store: &Path, today: &str) -> Command {
    let mut cmd = Command::new(cargo_bin!("aligner-tracker"));
    cmd.env_remove("ALIGNER_TRACKER_DB")
        .arg("--store")
        .arg(store)
        .arg("--today")
        .arg(today);
    cmd
}

#[test]
fn test_cli_setup_confirm_show() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("tracker.json");

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "2027-01-27", "1", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appointment: 27/01/2027"))
        .stdout(predicate::str::contains(">       1  08/11/2026  -"));

    tracker_cmd(&store, "2026-11-07")
        .args(["confirm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("        1  08/11/2026  07/11/2026"))
        .stdout(predicate::str::contains(">       2  27/11/2026  -"));

    tracker_cmd(&store, "2026-11-07")
        .args(["show", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,projected_change_date,actual_change_date\n\
             1,2026-11-08,2026-11-07\n\
             2,2026-11-27,\n",
        ))
        .stdout(predicate::str::contains("5,2027-01-27,\n"));
}

#[test]
fn test_cli_edit_reanchors() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("tracker.json");

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "2027-01-27", "1", "5"])
        .assert()
        .success();
    tracker_cmd(&store, "2026-11-08")
        .args(["confirm", "1"])
        .assert()
        .success();

    tracker_cmd(&store, "2026-11-20")
        .args(["edit", "1", "2026-11-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("        1  08/11/2026  17/11/2026"))
        .stdout(predicate::str::contains(">       2  05/12/2026  -"));
}

#[test]
fn test_cli_without_schedule() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("tracker.json");

    tracker_cmd(&store, "2026-10-19")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No schedule yet"));

    tracker_cmd(&store, "2026-10-19")
        .args(["confirm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No schedule yet"));
    assert!(!store.exists());
}

#[test]
fn test_cli_rejects_malformed_setup() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("tracker.json");

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "27/01/2027", "1", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "2027-01-27", "9", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation error"));

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "2027-01-27", "one", "5"])
        .assert()
        .failure();

    assert!(!store.exists());
}

#[test]
fn test_cli_reset() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("tracker.json");

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "2027-01-27", "1", "5"])
        .assert()
        .success();
    assert!(store.exists());

    tracker_cmd(&store, "2026-10-19")
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Schedule cleared."));
    assert!(!store.exists());
}

#[test]
fn test_cli_reports_overrun() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("tracker.json");

    tracker_cmd(&store, "2026-10-19")
        .args(["setup", "2026-10-29", "1", "2"])
        .assert()
        .success();

    tracker_cmd(&store, "2026-10-30")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Behind schedule"));
}
