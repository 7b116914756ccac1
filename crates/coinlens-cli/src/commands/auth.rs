//! Account and session commands.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use coinlens_core::{Credentials, FormOutcome, TokenStore};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Sign out and clear the stored session
    Logout,

    /// Create a new account
    Register(RegisterArgs),

    /// Display the current identity
    Whoami,

    /// Mint a fresh access token with the stored refresh token
    Refresh,
}

pub async fn handle(ctx: &AppContext, cmd: AuthCommand) -> Result<()> {
    match cmd.command {
        AuthSubcommand::Login(args) => login(ctx, args).await,
        AuthSubcommand::Logout => logout(ctx).await,
        AuthSubcommand::Register(args) => register(ctx, args).await,
        AuthSubcommand::Whoami => whoami(ctx).await,
        AuthSubcommand::Refresh => refresh(ctx).await,
    }
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

async fn login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    eprintln!("{}", "Signing in...".dimmed());

    let credentials = Credentials::new(&args.email, &args.password);
    match ctx.session.login(credentials).await? {
        FormOutcome::Accepted(user) => {
            ctx.store.cache_identity(&user);
            output::success("Signed in");
            println!();
            output::field("Name", &user.name);
            output::field("Email", &user.email);
            output::field("Role", &user.role.to_string());
            Ok(())
        }
        FormOutcome::Rejected(body) => {
            output::form_errors(&body);
            bail!("sign-in rejected");
        }
    }
}

async fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.logout().await?;
    output::success("Signed out");
    Ok(())
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email address
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    eprintln!("{}", "Creating account...".dimmed());

    match ctx
        .session
        .register(&args.name, &args.email, &args.password)
        .await?
    {
        FormOutcome::Accepted(message) => {
            output::success(&message);
            Ok(())
        }
        FormOutcome::Rejected(body) => {
            output::form_errors(&body);
            bail!("registration rejected");
        }
    }
}

async fn whoami(ctx: &AppContext) -> Result<()> {
    let snapshot = ctx.session.bootstrap().await?;

    if let Some(user) = snapshot.user() {
        output::field("Name", &user.name);
        output::field("Email", &user.email);
        output::field("Role", &user.role.to_string());
        if let Some(pair) = ctx.store.load() {
            output::field("Session expires", &pair.refresh_expires_at.to_rfc3339());
        }
        return Ok(());
    }

    // A kept credential with a cached identity means the check failed for a
    // reason other than rejection (e.g. the API was unreachable).
    if ctx.store.load().is_some() {
        if let Some(user) = ctx.store.cached_identity() {
            eprintln!(
                "{}",
                "Could not verify the session; showing cached identity.".dimmed()
            );
            output::field("Name (cached)", &user.name);
            output::field("Role (cached)", &user.role.to_string());
            return Ok(());
        }
    }

    bail!("Not signed in. Run 'coinlens auth login' first.");
}

async fn refresh(ctx: &AppContext) -> Result<()> {
    eprintln!("{}", "Refreshing access token...".dimmed());

    ctx.executor.refresh_now().await?;

    output::success("Access token refreshed");
    Ok(())
}
