//! Market data commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use coinlens_api::endpoints::CoinPage;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct CoinsCommand {
    #[command(subcommand)]
    pub command: CoinsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CoinsSubcommand {
    /// List coins by market cap
    List(ListArgs),

    /// Show detail for a single coin
    Show(ShowArgs),

    /// Search coins by name or symbol
    Search(SearchArgs),
}

pub async fn handle(ctx: &AppContext, cmd: CoinsCommand) -> Result<()> {
    match cmd.command {
        CoinsSubcommand::List(args) => list(ctx, args).await,
        CoinsSubcommand::Show(args) => show(ctx, args).await,
        CoinsSubcommand::Search(args) => search(ctx, args).await,
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
    let page = ctx.market().listings(args.page, args.limit).await?;
    print_page(&page, args.json)
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Coin id
    pub id: u64,

    /// Output raw JSON
    #[arg(long)]
    pub json: bool,
}

async fn show(ctx: &AppContext, args: ShowArgs) -> Result<()> {
    let coin = ctx.market().coin(args.id).await?;

    if args.json {
        return output::json_pretty(&coin);
    }

    output::field("Name", &coin.name);
    output::field("Symbol", &coin.symbol);
    if let Some(description) = &coin.description {
        output::field("About", description);
    }
    if let Some(logo) = &coin.logo {
        output::field("Logo", logo);
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search term (name, symbol or slug)
    pub query: String,

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

async fn search(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let page = ctx.market().search(&args.query, args.page, args.limit).await?;
    print_page(&page, args.json)
}

fn print_page(page: &CoinPage, json: bool) -> Result<()> {
    if json {
        return output::json_pretty(&page.data);
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
    println!();
    println!(
        "{}",
        format!("page {} · {} coins total", page.page, page.total).dimmed()
    );
    Ok(())
}
