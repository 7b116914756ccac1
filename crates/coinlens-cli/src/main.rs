//! coinlens - CLI for browsing the coinlens market API.
//!
//! This is a thin wrapper over the `coinlens-api` library: market listings,
//! the news feed, per-user watchlists, and the admin content area, with a
//! session persisted between invocations.

mod cli;
mod commands;
mod context;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    let ctx = AppContext::new(&cli.api)?;

    match cli.command {
        Commands::Auth(cmd) => commands::auth::handle(&ctx, cmd).await,
        Commands::Coins(cmd) => commands::coins::handle(&ctx, cmd).await,
        Commands::News(cmd) => commands::news::handle(&ctx, cmd).await,
        Commands::Watchlist(cmd) => commands::watchlist::handle(&ctx, cmd).await,
        Commands::Admin(cmd) => commands::admin::handle(&ctx, cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
