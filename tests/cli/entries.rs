//! Tests for `add`, `show`, `edit`, `delete`, and `list`.

use crate::support::*;

fn add_scenario(t: &Test) {
    for (content, tags, _) in SCENARIO {
        let output = t.add(content, &tags.join(","));
        assert_success(&output);
        assert_stdout_contains(&output, "added");
    }
}

#[test]
fn test_add_then_list() {
    let t = Test::init("journal");
    add_scenario(&t);

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "standup notes");
    assert_stdout_contains(&output, "dinner with friends");
    assert_stdout_contains(&output, "[work, important]");

    let ids = t.entry_ids();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_list_empty_store() {
    let t = Test::init("journal");

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no entries");
}

#[test]
fn test_list_respects_count() {
    let t = Test::init("journal");
    add_scenario(&t);

    let output = t.sealbook(&["list", "-n", "2", "--json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_add_joins_words() {
    let t = Test::init("journal");

    assert_success(&t.sealbook(&["add", "three", "separate", "words"]));

    let output = t.list();
    assert_stdout_contains(&output, "three separate words");
}

#[test]
fn test_add_empty_content_fails() {
    let t = Test::init("journal");

    let output = t.add("   ", "");
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot be empty");
}

#[test]
fn test_show_by_prefix() {
    let t = Test::init("journal");
    assert_success(&t.add("remember the milk", "errands"));
    let id = t.entry_ids().remove(0);

    let output = t.show(&id[..8]);
    assert_success(&output);
    assert_stdout_contains(&output, "remember the milk");
    assert_stdout_contains(&output, &id);
    assert_stdout_contains(&output, "errands");
}

#[test]
fn test_show_short_prefix_fails() {
    let t = Test::init("journal");
    assert_success(&t.add("remember the milk", ""));
    let id = t.entry_ids().remove(0);

    let output = t.show(&id[..7]);
    assert_failure(&output);
    assert_stderr_contains(&output, "too short");
    assert_stderr_contains(&output, "use more characters");
}

#[test]
fn test_show_json() {
    let t = Test::init("journal");
    assert_success(&t.add("structured", "a, b ,a"));
    let id = t.entry_ids().remove(0);

    let output = t.sealbook(&["show", &id, "--json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], id.as_str());
    assert_eq!(value["content"], "structured");
    assert_eq!(value["tags"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_edit_content_and_tags() {
    let t = Test::init("journal");
    assert_success(&t.add("draft", "wip"));
    let id = t.entry_ids().remove(0);

    let output = t.sealbook(&["edit", &id[..8], "--content", "final", "-t", "done"]);
    assert_success(&output);
    assert_stdout_contains(&output, "updated");

    let output = t.sealbook(&["show", &id, "--json"]);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["content"], "final");
    assert_eq!(value["tags"], serde_json::json!(["done"]));

    assert_stdout_excludes(&t.search(&["--tag", "wip"]), "final");
}

#[test]
fn test_edit_tags_only_keeps_content() {
    let t = Test::init("journal");
    assert_success(&t.add("keep me", "old"));
    let id = t.entry_ids().remove(0);

    assert_success(&t.sealbook(&["edit", &id, "-t", "new"]));

    let output = t.show(&id);
    assert_stdout_contains(&output, "keep me");
    assert_stdout_contains(&output, "new");
}

#[test]
fn test_edit_nothing_to_change() {
    let t = Test::init("journal");
    assert_success(&t.add("untouched", ""));
    let id = t.entry_ids().remove(0);

    let output = t.sealbook(&["edit", &id]);
    assert_success(&output);
    assert_stderr_contains(&output, "nothing to change");
}

#[test]
fn test_delete_entry() {
    let t = Test::init("journal");
    add_scenario(&t);
    let ids = t.entry_ids();

    let output = t.delete(&ids[0][..8]);
    assert_success(&output);
    assert_stdout_contains(&output, "deleted");

    let remaining = t.entry_ids();
    assert_eq!(remaining.len(), 2);
    assert!(!remaining.contains(&ids[0]));

    let output = t.show(&ids[0]);
    assert_failure(&output);
    assert_stderr_contains(&output, "record not found");
}

#[test]
fn test_delete_with_missing_file_cleans_index() {
    let t = Test::init("journal");
    assert_success(&t.add("vanishing", ""));
    let id = t.entry_ids().remove(0);

    let entries = t.store_root("journal").join("entries");
    for year in std::fs::read_dir(&entries).unwrap() {
        std::fs::remove_dir_all(year.unwrap().path()).unwrap();
    }

    let output = t.delete(&id);
    assert_success(&output);
    assert_stderr_contains(&output, "already missing");
    assert!(t.entry_ids().is_empty());
}
