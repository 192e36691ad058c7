use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "cadastra", bin_name = "cadastra", version = get_version())]
#[command(about = "Register people by name and email", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $CADASTRA_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new person
    #[command(alias = "n")]
    Add {
        /// Full name (letters and spaces)
        name: String,

        /// Email address
        email: String,
    },

    /// Change a registered person's name and/or email
    #[command(alias = "e")]
    Edit {
        /// Record id (see `cadastra list`)
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New email
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Remove a registered person
    #[command(alias = "rm")]
    Delete {
        /// Record id (see `cadastra list`)
        id: String,
    },

    /// List registered people
    #[command(alias = "ls")]
    List {
        /// Order by name instead of registration order
        #[arg(short, long)]
        alpha: bool,

        /// Only show names or emails containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Search names and emails
    Search {
        term: String,

        /// Order by name instead of registration order
        #[arg(short, long)]
        alpha: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (storage-key, data-file, dark-mode)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
