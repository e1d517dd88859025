//! Tests for `sealbook rebuild` and `sealbook completions`.

use crate::support::*;

#[test]
fn test_rebuild_after_index_loss() {
    let t = Test::init("journal");
    for (content, tags, _) in SCENARIO {
        assert_success(&t.add(content, &tags.join(",")));
    }
    let ids = t.entry_ids();

    std::fs::remove_file(t.store_root("journal").join("index.age")).unwrap();
    assert!(t.entry_ids().is_empty());

    let output = t.rebuild();
    assert_success(&output);
    assert_stdout_contains(&output, "rebuilt index: 3 entries");
    assert_eq!(t.entry_ids(), ids);

    let output = t.search(&["--tag", "work"]);
    assert_stdout_contains(&output, "quarterly review");
}

#[test]
fn test_rebuild_empty_store() {
    let t = Test::init("journal");

    let output = t.rebuild();
    assert_success(&output);
    assert_stdout_contains(&output, "rebuilt index: 0 entries");
}

#[test]
fn test_completions() {
    let t = Test::new();

    for shell in ["bash", "zsh", "fish", "power-shell"] {
        let output = t.sealbook(&["completions", shell]);
        assert_success(&output);
        assert_stdout_contains(&output, "sealbook");
    }
}
