//! Completions command.

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell as Target};

use crate::cli::{Cli, Shell};
use crate::error::Result;

impl From<Shell> for Target {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Target::Bash,
            Shell::Zsh => Target::Zsh,
            Shell::Fish => Target::Fish,
            Shell::PowerShell => Target::PowerShell,
        }
    }
}

/// Write a completion script for `shell` to stdout.
pub fn execute(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();

    generate(Target::from(shell), &mut command, name, &mut io::stdout().lock());
    Ok(())
}
