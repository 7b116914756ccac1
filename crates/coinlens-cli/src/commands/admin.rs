//! Content-management commands. The server enforces the admin role.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use coinlens_api::endpoints::TipDraft;
use coinlens_core::FormOutcome;

use crate::commands::news::print_tip_line;
use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// List tips including unpublished ones
    Tips(TipsArgs),

    /// Publish a new tip
    AddTip(TipArgs),

    /// Update an existing tip
    EditTip(EditTipArgs),

    /// Remove a tip
    DeleteTip(DeleteTipArgs),
}

pub async fn handle(ctx: &AppContext, cmd: AdminCommand) -> Result<()> {
    match cmd.command {
        AdminSubcommand::Tips(args) => tips(ctx, args).await,
        AdminSubcommand::AddTip(args) => add_tip(ctx, args).await,
        AdminSubcommand::EditTip(args) => edit_tip(ctx, args).await,
        AdminSubcommand::DeleteTip(args) => delete_tip(ctx, args).await,
    }
}

#[derive(Args, Debug)]
pub struct TipsArgs {
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

async fn tips(ctx: &AppContext, args: TipsArgs) -> Result<()> {
    let page = ctx.admin().tips(args.page, args.limit).await?;

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
pub struct TipArgs {
    /// Tip title
    #[arg(long)]
    pub title: String,

    /// Tip body
    #[arg(long)]
    pub description: String,

    /// Category label
    #[arg(long)]
    pub category: Option<String>,

    /// URL of an already-uploaded illustration
    #[arg(long)]
    pub image_url: Option<String>,
}

async fn add_tip(ctx: &AppContext, args: TipArgs) -> Result<()> {
    let draft = TipDraft {
        title: &args.title,
        description: &args.description,
        category: args.category.as_deref(),
        image_url: args.image_url.as_deref(),
    };

    match ctx.admin().create_tip(&draft).await? {
        FormOutcome::Accepted(created) => {
            output::success(&created.message);
            output::field("Id", &created.tip.to_string());
            Ok(())
        }
        FormOutcome::Rejected(body) => {
            output::form_errors(&body);
            bail!("tip rejected");
        }
    }
}

#[derive(Args, Debug)]
pub struct EditTipArgs {
    /// Tip id
    pub id: u64,

    #[command(flatten)]
    pub tip: TipArgs,
}

async fn edit_tip(ctx: &AppContext, args: EditTipArgs) -> Result<()> {
    let draft = TipDraft {
        title: &args.tip.title,
        description: &args.tip.description,
        category: args.tip.category.as_deref(),
        image_url: args.tip.image_url.as_deref(),
    };

    match ctx.admin().edit_tip(args.id, &draft).await? {
        FormOutcome::Accepted(message) => {
            output::success(&message);
            Ok(())
        }
        FormOutcome::Rejected(body) => {
            output::form_errors(&body);
            bail!("tip rejected");
        }
    }
}

#[derive(Args, Debug)]
pub struct DeleteTipArgs {
    /// Tip id
    pub id: u64,
}

async fn delete_tip(ctx: &AppContext, args: DeleteTipArgs) -> Result<()> {
    eprintln!("{}", "Deleting tip...".dimmed());
    let message = ctx.admin().delete_tip(args.id).await?;
    output::success(&message);
    Ok(())
}
