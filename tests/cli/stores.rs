//! Tests for the store registry: `stores`, `set-default`, `forget`, `--store`.

use crate::support::*;

#[test]
fn test_no_stores_registered() {
    let t = Test::new();

    let output = t.stores();
    assert_success(&output);
    assert_stdout_contains(&output, "no stores registered");
}

#[test]
fn test_first_store_is_default() {
    let t = Test::init("work");
    assert_success(&t.init_cmd("home"));

    let output = t.stores();
    assert_success(&output);
    assert_stdout_contains(&output, "* work");
    assert_stdout_contains(&output, "  home");
}

#[test]
fn test_store_flag_selects_store() {
    let t = Test::init("work");
    assert_success(&t.init_cmd("home"));

    assert_success(&t.sealbook(&["-s", "home", "add", "private note"]));
    assert_success(&t.add("work note", ""));

    let output = t.sealbook(&["list", "--store", "home"]);
    assert_stdout_contains(&output, "private note");
    assert_stdout_excludes(&output, "work note");

    let output = t.cmd().env("SEALBOOK_STORE", "home").arg("list").output().unwrap();
    assert_stdout_contains(&output, "private note");
}

#[test]
fn test_set_default_and_forget() {
    let t = Test::init("work");
    assert_success(&t.init_cmd("home"));

    let output = t.sealbook(&["set-default", "home"]);
    assert_success(&output);
    assert_stdout_contains(&t.stores(), "* home");

    let output = t.sealbook(&["forget", "home"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot remove default store");

    let output = t.sealbook(&["forget", "work"]);
    assert_success(&output);
    assert_stdout_contains(&output, "forgot store work");
    assert!(t.store_root("work").join(".sealbook.toml").exists());
    assert_stdout_excludes(&t.stores(), "work");

    let output = t.sealbook(&["-s", "work", "list"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "store not found");
}

#[test]
fn test_set_default_unknown_store() {
    let t = Test::init("work");

    let output = t.sealbook(&["set-default", "nope"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "store not found");
}
