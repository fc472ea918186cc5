//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use carrent_types::OutputFormat;
use carrent_types::RenterClass;

#[derive(Parser)]
#[command(name = "carrent")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Terminal vehicle rental management for clients, staff and administrators")]
#[command(long_about = None)]
pub struct Cli {
    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Length of one rental-period unit in seconds. Uses config value if not specified.
    #[arg(long, global = true)]
    pub period_secs: Option<i64>,

    /// TOML file with the startup fleet and accounts. Uses config value if not specified.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive rental desk
    Run,

    /// Show the fleet as loaded at startup
    Fleet {
        /// Only vehicles that are not rented out
        #[arg(long)]
        available: bool,
    },

    /// Show client and staff accounts as loaded at startup
    Renters {
        /// Only one class of renter
        #[arg(long, short = 'c')]
        class: Option<RenterClass>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set rental-period length in seconds (86400 = one day)
        #[arg(long)]
        set_period: Option<i64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set seed file
        #[arg(long)]
        set_seed: Option<PathBuf>,

        /// Go back to the built-in sample seed
        #[arg(long)]
        clear_seed: bool,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
