//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sealbook command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME (and USERPROFILE) set to the temporary home directory
    /// - SEALBOOK_AGE_KEY_FILE inside that home
    /// - colors off and no inherited store/log overrides
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sealbook").expect("failed to find sealbook binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("SEALBOOK_AGE_KEY_FILE", self.key_file());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SEALBOOK_STORE");
        cmd.env_remove("SEALBOOK_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .unwrap_or_else(|e| panic!("failed to run sealbook {:?}: {}", args, e))
    }

    /// Shortcut for `sealbook keygen`.
    pub fn keygen(&self) -> Output {
        self.run(&["keygen"])
    }

    /// Shortcut for `sealbook init -n NAME -p NAME`.
    pub fn init_cmd(&self, name: &str) -> Output {
        self.run(&["init", "-n", name, "-p", name])
    }

    /// Shortcut for `sealbook add TEXT [-t TAGS]`.
    pub fn add(&self, text: &str, tags: &str) -> Output {
        if tags.is_empty() {
            self.run(&["add", text])
        } else {
            self.run(&["add", text, "-t", tags])
        }
    }

    pub fn show(&self, id: &str) -> Output {
        self.run(&["show", id])
    }

    pub fn list(&self) -> Output {
        self.run(&["list"])
    }

    pub fn list_json(&self) -> Output {
        self.run(&["list", "--json"])
    }

    /// Shortcut for `sealbook search ARGS...`.
    pub fn search(&self, args: &[&str]) -> Output {
        let mut all = vec!["search"];
        all.extend_from_slice(args);
        self.run(&all)
    }

    pub fn delete(&self, id: &str) -> Output {
        self.run(&["delete", id, "--yes"])
    }

    pub fn rebuild(&self) -> Output {
        self.run(&["rebuild"])
    }

    pub fn recipients(&self, args: &[&str]) -> Output {
        let mut all = vec!["recipients"];
        all.extend_from_slice(args);
        self.run(&all)
    }

    pub fn stores(&self) -> Output {
        self.run(&["stores"])
    }

    /// Run any sealbook command.
    pub fn sealbook(&self, args: &[&str]) -> Output {
        self.run(args)
    }

    /// Ids of all entries, newest first, via `list --json`.
    pub fn entry_ids(&self) -> Vec<String> {
        let output = self.run(&["list", "-n", "1000", "--json"]);
        super::assert_success(&output);
        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("list --json is not valid JSON");
        value
            .as_array()
            .expect("list --json is not an array")
            .iter()
            .map(|v| v["id"].as_str().unwrap().to_string())
            .collect()
    }
}
