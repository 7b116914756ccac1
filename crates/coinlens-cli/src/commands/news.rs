//! News feed commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use coinlens_api::endpoints::Tip;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct NewsCommand {
    #[command(subcommand)]
    pub command: NewsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NewsSubcommand {
    /// List published tips
    List(ListArgs),

    /// Show a single tip
    Show(ShowArgs),
}

pub async fn handle(ctx: &AppContext, cmd: NewsCommand) -> Result<()> {
    match cmd.command {
        NewsSubcommand::List(args) => list(ctx, args).await,
        NewsSubcommand::Show(args) => show(ctx, args).await,
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
    let page = ctx.news().tips(args.page, args.limit).await?;

    if args.json {
        return output::json_pretty(&page.data);
    }

    for tip in &page.data {
        print_tip_line(tip);
    }
    println!();
    println!(
        "{}",
        format!(
            "page {} of {} · {} tips total",
            page.page, page.total_pages, page.total_items
        )
        .dimmed()
    );
    Ok(())
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Tip id
    pub id: u64,

    /// Output raw JSON
    #[arg(long)]
    pub json: bool,
}

async fn show(ctx: &AppContext, args: ShowArgs) -> Result<()> {
    let tip = ctx.news().tip(args.id).await?;

    if args.json {
        return output::json_pretty(&tip);
    }

    println!("{}", tip.title.bold());
    println!(
        "{}",
        format!(
            "#{} · {} · {}",
            tip.id,
            tip.category.as_deref().unwrap_or("uncategorized"),
            tip.created_at.format("%Y-%m-%d")
        )
        .dimmed()
    );
    println!();
    println!("{}", tip.description);
    if let Some(image) = &tip.image {
        println!();
        output::field("Image", image);
    }
    Ok(())
}

pub(crate) fn print_tip_line(tip: &Tip) {
    let marker = match tip.is_active {
        Some(false) => " (inactive)".dimmed().to_string(),
        _ => String::new(),
    };
    println!(
        "{:>5}  {}  {}{}",
        tip.id,
        tip.created_at.format("%Y-%m-%d").to_string().dimmed(),
        tip.title,
        marker,
    );
}
