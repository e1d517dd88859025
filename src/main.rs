//! Sealbook - an encrypted, file-backed journal.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sealbook::cli::output;
use sealbook::cli::{execute, Cli};
use sealbook::core::constants;
use sealbook::error::{ConfigError, Error, KeyError, RotationError, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("sealbook=debug")
        } else {
            EnvFilter::new("sealbook=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.store) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::NotInitialized(_))
        | Error::Config(ConfigError::NoStores) => Some("run: sealbook init -n NAME -p PATH"),
        Error::Config(ConfigError::StoreNotFound(_)) | Error::Config(ConfigError::NoDefault) => {
            Some("run: sealbook stores")
        }
        Error::Key(KeyError::NoIdentity(_)) => Some("run: sealbook keygen"),
        Error::Store(StoreError::IndexInconsistency { .. }) => Some("run: sealbook rebuild"),
        Error::Store(StoreError::PrefixTooShort { .. })
        | Error::Store(StoreError::AmbiguousPrefix { .. }) => {
            Some("use more characters of the entry id")
        }
        Error::Rotation(RotationError::Failed { .. }) => {
            Some("fix or remove the failing entries, then run the command again")
        }
        Error::Rotation(RotationError::RollbackFailed { .. }) => {
            Some("copy the backup over .sealbook.toml before doing anything else")
        }
        _ => None,
    }
}
