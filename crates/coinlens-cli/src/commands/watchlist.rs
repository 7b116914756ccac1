//! Watchlist commands. These require a signed-in session.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use coinlens_core::FormOutcome;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct WatchlistCommand {
    #[command(subcommand)]
    pub command: WatchlistSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WatchlistSubcommand {
    /// List watched coins with market data
    List(ListArgs),

    /// Add a coin to the watchlist
    Add(AddArgs),

    /// Remove a coin from the watchlist
    Remove(RemoveArgs),
}

pub async fn handle(ctx: &AppContext, cmd: WatchlistCommand) -> Result<()> {
    match cmd.command {
        WatchlistSubcommand::List(args) => list(ctx, args).await,
        WatchlistSubcommand::Add(args) => add(ctx, args).await,
        WatchlistSubcommand::Remove(args) => remove(ctx, args).await,
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output raw JSON
    #[arg(long)]
    pub json: bool,
}

async fn list(ctx: &AppContext, args: ListArgs) -> Result<()> {
    let page = ctx.watchlist().list(args.page, args.limit).await?;

    if args.json {
        return output::json_pretty(&page.data);
    }

    if page.data.is_empty() {
        println!("{}", "Watchlist is empty.".dimmed());
        return Ok(());
    }

    for coin in &page.data {
        println!(
            "{:>6}  {:<8} {:<24} {:>14}  {}",
            coin.id,
            coin.symbol.bold(),
            coin.name,
            output::fmt_price(coin.price),
            output::fmt_change(coin.percent_change_24h),
        );
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Coin id to watch
    pub coin_id: u64,
}

async fn add(ctx: &AppContext, args: AddArgs) -> Result<()> {
    match ctx.watchlist().add(args.coin_id).await? {
        FormOutcome::Accepted(message) => {
            output::success(&message);
            Ok(())
        }
        FormOutcome::Rejected(body) => {
            output::form_errors(&body);
            bail!("could not add coin to watchlist");
        }
    }
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Coin id to stop watching
    pub coin_id: u64,
}

async fn remove(ctx: &AppContext, args: RemoveArgs) -> Result<()> {
    let message = ctx.watchlist().remove(args.coin_id).await?;
    output::success(&message);
    Ok(())
}
