//! Carrent - terminal vehicle rental management
//!
//! Clients and staff rent and return vehicles; an administrator manages
//! the fleet and the accounts.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use carrent_cli::cli::Cli;
use carrent_cli::commands;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
