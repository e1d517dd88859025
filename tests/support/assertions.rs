//! Assertions over command output.

use std::process::Output;

/// Fail the test with stderr unless the command exited 0.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "sealbook exited with {}:\n{}",
        output.status,
        stderr(output)
    );
}

/// Fail the test unless the command exited non-zero.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "sealbook unexpectedly succeeded:\n{}",
        stdout(output)
    );
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    let text = stdout(output);
    assert!(text.contains(needle), "expected '{needle}' on stdout:\n{text}");
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    let text = stderr(output);
    assert!(text.contains(needle), "expected '{needle}' on stderr:\n{text}");
}

pub fn assert_stdout_excludes(output: &Output, needle: &str) {
    let text = stdout(output);
    assert!(!text.contains(needle), "did not expect '{needle}' on stdout:\n{text}");
}
