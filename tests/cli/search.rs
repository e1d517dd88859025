//! Tests for `sealbook search`.

use crate::support::*;

fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

fn journal() -> Test {
    let t = Test::init("journal");
    for (content, tags, _) in SCENARIO {
        assert_success(&t.add(content, &tags.join(",")));
    }
    t
}

#[test]
fn test_search_by_tag() {
    let t = journal();

    let output = t.search(&["--tag", "work"]);
    assert_success(&output);
    assert_stdout_contains(&output, "standup notes");
    assert_stdout_contains(&output, "quarterly review");
    assert_stdout_excludes(&output, "dinner with friends");
}

#[test]
fn test_search_by_all_tags() {
    let t = journal();

    let output = t.search(&["--tags", "work,important"]);
    assert_success(&output);
    assert_stdout_contains(&output, "quarterly review");
    assert_stdout_excludes(&output, "standup notes");
}

#[test]
fn test_search_unknown_tag() {
    let t = journal();

    let output = t.search(&["--tag", "nonexistent"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no entries");
}

#[test]
fn test_search_on_today() {
    let t = journal();

    let output = t.search(&["--on", &today(), "--json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn test_search_range_and_last_days() {
    let t = journal();

    let output = t.search(&["--from", "2000-01-01", "--json"]);
    assert_success(&output);
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);

    let output = t.search(&["--from", "2000-01-01", "--to", "2000-12-31"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no entries");

    let output = t.search(&["--last", "1"]);
    assert_success(&output);
    assert_stdout_contains(&output, "standup notes");
}

#[test]
fn test_search_invalid_date() {
    let t = journal();

    let output = t.search(&["--on", "2024-13-01"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid date");
}

#[test]
fn test_search_reversed_range() {
    let t = journal();

    let output = t.search(&["--from", "2024-02-01", "--to", "2024-01-01"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid date range");
}

#[test]
fn test_search_requires_a_mode() {
    let t = journal();

    let output = t.search(&[]);
    assert_failure(&output);

    let output = t.search(&["--tag", "work", "--on", &today()]);
    assert_failure(&output);
}
