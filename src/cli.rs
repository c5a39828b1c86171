//! Command-line interface definition for `elv`.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "elv",
    version,
    about = "Verify email addresses with the EmailListVerify API."
)]
pub struct Cli {
    /// API secret.
    #[arg(long, env = "EMAILLISTVERIFY_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Override the API base URL.
    #[arg(long, global = true, hide = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a single address.
    Verify {
        email: String,
        /// Return every field the provider reports.
        #[arg(long)]
        detailed: bool,
    },
    /// Show remaining credits.
    Credits,
    /// Verify several addresses one after another.
    Batch {
        /// Read addresses from a file, one per line.
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
        /// Addresses given directly.
        emails: Vec<String>,
        #[arg(long)]
        max_batch_size: Option<usize>,
    },
    /// Upload a CSV file for bulk verification.
    Upload {
        file: PathBuf,
        /// Name reported to the provider.
        #[arg(long)]
        filename: Option<String>,
    },
    /// Show the status of a bulk job.
    Status { file_id: String },
    /// Wait until a bulk job finishes.
    Wait {
        file_id: String,
        /// Seconds between polls.
        #[arg(long)]
        interval: Option<u64>,
        /// Give up after this many seconds.
        #[arg(long)]
        max_wait: Option<u64>,
    },
    /// Download the results of a finished bulk job.
    Download {
        file_id: String,
        /// Only the clean addresses.
        #[arg(long)]
        clean: bool,
        /// Write to this file instead of stdout.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Upload, wait and download in one go.
    Process {
        input: PathBuf,
        output: PathBuf,
        /// Return right after the upload.
        #[arg(long)]
        no_wait: bool,
    },
    /// Offline syntax and disposable-domain check.
    Check { email: String },
}
