//! Command-line interface.

pub mod completions;
pub mod entries;
pub mod init;
pub mod keygen;
pub mod list;
pub mod maintenance;
pub mod output;
pub mod recipients;
pub mod resolve;
pub mod search;
pub mod stores;

use clap::{ArgGroup, Parser, Subcommand};

/// Sealbook - an encrypted, file-backed journal.
#[derive(Parser)]
#[command(
    name = "sealbook",
    about = "An encrypted, file-backed journal",
    version
)]
pub struct Cli {
    /// Store to use (defaults to the configured default store)
    #[arg(short, long, global = true, env = "SEALBOOK_STORE")]
    pub store: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a new store and register it
    Init {
        /// Name to register the store under
        #[arg(short, long)]
        name: String,
        /// Directory for the store
        #[arg(short, long)]
        path: String,
        /// Recipient public keys, comma-separated (defaults to your own key)
        #[arg(short, long, value_delimiter = ',')]
        recipients: Vec<String>,
    },

    /// Generate an identity (private key)
    Keygen {
        /// Overwrite an existing identity file
        #[arg(long)]
        force: bool,
    },

    /// Add an entry
    Add {
        /// Entry text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Tags, comma-separated
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Show an entry
    Show {
        /// Entry id or prefix (at least 8 characters)
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change an entry's content or tags
    Edit {
        /// Entry id or prefix
        id: String,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// New tags, comma-separated (replaces existing tags)
        #[arg(short, long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },

    /// Delete an entry
    Delete {
        /// Entry id or prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List recent entries
    List {
        /// Number of entries
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search entries by date or tag
    #[command(group(
        ArgGroup::new("mode")
            .required(true)
            .args(["on", "from", "last", "tag", "tags"])
    ))]
    Search {
        /// Entries on a date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
        /// Entries from a date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End of a --from range (defaults to today)
        #[arg(long, requires = "from")]
        to: Option<String>,
        /// Entries from the last N days
        #[arg(long)]
        last: Option<u32>,
        /// Entries with a tag
        #[arg(long)]
        tag: Option<String>,
        /// Entries with all of these tags, comma-separated
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the index from the entry files
    Rebuild,

    /// List registered stores
    Stores,

    /// Set the default store
    SetDefault {
        /// Store name
        name: String,
    },

    /// Unregister a store (files are left in place)
    Forget {
        /// Store name
        name: String,
    },

    /// Manage recipients
    Recipients {
        #[command(subcommand)]
        action: RecipientsAction,
    },

    /// Re-encrypt every entry and the index for the current recipients
    Reencrypt,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Recipient subcommands.
#[derive(Subcommand)]
pub enum RecipientsAction {
    /// List recipients
    List,

    /// Add a recipient and re-encrypt
    Add {
        /// age public key
        key: String,
    },

    /// Remove a recipient and re-encrypt
    Rm {
        /// age public key
        key: String,
    },
}

/// Execute a command.
pub fn execute(command: Command, store: Option<String>) -> crate::error::Result<()> {
    use Command::*;

    let store = store.as_deref();
    match command {
        Init {
            name,
            path,
            recipients,
        } => init::execute(&name, &path, recipients),
        Keygen { force } => keygen::execute(force),
        Add { text, tags } => entries::add(store, &text, tags),
        Show { id, json } => entries::show(store, &id, json),
        Edit { id, content, tags } => entries::edit(store, &id, content, tags),
        Delete { id, yes } => entries::delete(store, &id, yes),
        List { count, json } => list::execute(store, count, json),
        Search {
            on,
            from,
            to,
            last,
            tag,
            tags,
            json,
        } => {
            let query = search::Query::from_args(on, from, to, last, tag, tags)?;
            search::execute(store, query, json)
        }
        Rebuild => maintenance::rebuild(store),
        Stores => stores::list(),
        SetDefault { name } => stores::set_default(&name),
        Forget { name } => stores::forget(&name),
        Recipients { action } => match action {
            RecipientsAction::List => recipients::list(store),
            RecipientsAction::Add { key } => recipients::add(store, &key),
            RecipientsAction::Rm { key } => recipients::rm(store, &key),
        },
        Reencrypt => maintenance::reencrypt(store),
        Completions { shell } => completions::execute(shell),
    }
}
