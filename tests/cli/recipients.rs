//! Tests for `sealbook recipients` and `sealbook reencrypt`.

use crate::support::*;

fn own_key(t: &Test) -> String {
    let output = t.recipients(&["list"]);
    assert_success(&output);
    stdout(&output)
        .lines()
        .find_map(|line| line.trim().strip_prefix("• "))
        .expect("no recipient listed")
        .to_string()
}

#[test]
fn test_recipients_list() {
    let t = Test::init("journal");

    let output = t.recipients(&["list"]);
    assert_success(&output);
    assert_stdout_contains(&output, "Recipients (1)");
    assert!(own_key(&t).starts_with("age1"));
}

#[test]
fn test_add_and_remove_recipient() {
    let t = Test::init("journal");
    assert_success(&t.add("shared thoughts", ""));

    let output = t.recipients(&["add", BOB_PUBLIC_KEY]);
    assert_success(&output);
    assert_stdout_contains(&output, "added recipient");
    assert_stdout_contains(&output, "re-encrypted 1 entries");

    let output = t.recipients(&["list"]);
    assert_stdout_contains(&output, "Recipients (2)");
    assert_stdout_contains(&output, BOB_PUBLIC_KEY);

    // The owner can still read after rotation.
    assert_stdout_contains(&t.list(), "shared thoughts");
    assert!(!t.store_root("journal").join(".sealbook.toml.bak").exists());

    let output = t.recipients(&["rm", BOB_PUBLIC_KEY]);
    assert_success(&output);
    assert_stdout_contains(&output, "removed recipient");
    assert_stdout_excludes(&t.recipients(&["list"]), BOB_PUBLIC_KEY);
}

#[test]
fn test_add_duplicate_recipient_fails() {
    let t = Test::init("journal");
    let key = own_key(&t);

    let output = t.recipients(&["add", &key]);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_add_invalid_recipient_fails() {
    let t = Test::init("journal");

    let output = t.recipients(&["add", INVALID_PUBLIC_KEY]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid public key");
}

#[test]
fn test_remove_last_recipient_fails() {
    let t = Test::init("journal");
    let key = own_key(&t);
    let rules = t.store_root("journal").join(".sealbook.toml");
    let before = std::fs::read(&rules).unwrap();

    let output = t.recipients(&["rm", &key]);
    assert_failure(&output);
    assert_stderr_contains(&output, "last recipient");
    assert_eq!(std::fs::read(&rules).unwrap(), before);
}

#[test]
fn test_remove_unknown_recipient_fails() {
    let t = Test::init("journal");

    let output = t.recipients(&["rm", BOB_PUBLIC_KEY]);
    assert_failure(&output);
    assert_stderr_contains(&output, "recipient not found");
}

#[test]
fn test_reencrypt_keeps_entries_readable() {
    let t = Test::init("journal");
    for (content, tags, _) in SCENARIO {
        assert_success(&t.add(content, &tags.join(",")));
    }
    let ids = t.entry_ids();

    let output = t.sealbook(&["reencrypt"]);
    assert_success(&output);
    assert_stdout_contains(&output, "re-encrypted 3 entries");

    assert_eq!(t.entry_ids(), ids);
    assert_stdout_contains(&t.show(&ids[0]), "quarterly review");
}
