//! Error reporting and hints.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_no_stores_hints_init() {
    let t = Test::new();
    assert_success(&t.keygen());

    t.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no stores configured"))
        .stderr(predicate::str::contains("sealbook init"));
}

#[test]
fn test_missing_identity_hints_keygen() {
    let t = Test::init("journal");
    std::fs::remove_file(t.key_file()).unwrap();

    t.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no identity file"))
        .stderr(predicate::str::contains("sealbook keygen"));
}

#[test]
fn test_wrong_identity_cannot_read() {
    let t = Test::init("journal");
    assert_success(&t.add("secret", ""));
    assert_success(&t.sealbook(&["keygen", "--force"]));

    t.cmd()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decrypt"));
}

#[test]
fn test_unknown_id() {
    let t = Test::init("journal");

    t.cmd()
        .args(["show", "ffffffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("record not found"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::init("journal");

    t.cmd()
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEBUG").not())
        .stderr(predicate::str::contains("DEBUG"));
}

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("recipients"))
        .stdout(predicate::str::contains("rebuild"));
}
