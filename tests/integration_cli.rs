//! Binary-level behavior checks.

use assert_cmd::Command;
use predicates::prelude::*;

fn tessera() -> Command {
    Command::cargo_bin("tessera").unwrap()
}

#[test]
fn version_command_prints_dev_sentinel() {
    // Test builds carry no release provenance.
    tessera()
        .arg("version")
        .assert()
        .success()
        .stdout("tessera version dev\n");
}

#[test]
fn unknown_project_is_a_clean_one_line_error() {
    tessera()
        .args(["init", "definitely-not-a-project", "some-target"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown project"))
        .stderr(predicate::str::contains("quickstart"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn run_rejects_short_durations_before_any_request() {
    tessera()
        .args([
            "run",
            "--name=smoke",
            "--tenant=acme",
            "--username=u",
            "--password=p",
            "--config=registry.io/acme/config:v1",
            "--image=registry.io/acme/app:v1",
            "--email=dev@acme.com",
            "--duration=10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duration can't be less than 15"));
}

#[test]
fn run_rejects_invalid_email() {
    tessera()
        .args([
            "run",
            "--name=smoke",
            "--tenant=acme",
            "--username=u",
            "--password=p",
            "--config=registry.io/acme/config:v1",
            "--image=registry.io/acme/app:v1",
            "--email=not-an-email",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("email not valid"));
}

#[test]
fn run_requires_its_mandatory_flags() {
    tessera()
        .args(["run", "--name=smoke"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn help_lists_the_command_surface() {
    tessera()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("version"))
        // The debug command is hidden.
        .stdout(predicate::str::contains("multiverse").not());
}

#[test]
fn placeholder_commands_exit_successfully() {
    for cmd in ["auth", "config", "contact"] {
        tessera()
            .arg(cmd)
            .assert()
            .success()
            .stdout(predicate::str::contains("NOT IMPLEMENTED"));
    }
}
