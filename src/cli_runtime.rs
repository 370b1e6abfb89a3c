use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::Commands;

const LOG_ENV: &str = "BOOKMARKS_LOG";

#[derive(Parser)]
#[command(name = "bookmarks")]
#[command(about = "Offline bookmark tree with batched change-requests", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    crate::cli_exec::handle_command(cli.command)
}

/// Logs go to stderr so stdout stays parseable; `BOOKMARKS_LOG` overrides the
/// default `warn` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
