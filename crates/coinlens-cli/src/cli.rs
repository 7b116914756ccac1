//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{admin, auth, coins, news, watchlist};

/// Browse cryptocurrency market data and the coinlens news feed.
#[derive(Parser, Debug)]
#[command(name = "coinlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, default_value = "http://localhost:5000/api/v1")]
    pub api: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(auth::AuthCommand),

    /// Market listings, detail and search
    Coins(coins::CoinsCommand),

    /// News and tips feed
    News(news::NewsCommand),

    /// Personal watchlist
    Watchlist(watchlist::WatchlistCommand),

    /// Content management (admin accounts only)
    Admin(admin::AdminCommand),
}
