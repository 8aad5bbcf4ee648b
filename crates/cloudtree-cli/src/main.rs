//! CloudTree CLI - Command-line interface for CloudTree
//!
//! Provides commands for:
//! - Identifying the token's account
//! - Listing roots, folders and whole subtrees
//! - Uploading, downloading, replacing and deleting files
//! - Mirroring a remote subtree to a local directory

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod output;

use commands::{
    account::AccountCommand,
    list::{FindCommand, LsCommand, RootsCommand},
    pull::PullCommand,
    transfer::{CatCommand, GetCommand, MkdirCommand, PutCommand, RmCommand},
};
use context::CommandContext;
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "cloudtree", version, about = "Traverse and transfer files in a remote store")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Access token for the remote store
    #[arg(long, global = true, env = "CLOUDTREE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the account that owns the access token
    Account(AccountCommand),
    /// List the folders at the root of the store
    Roots(RootsCommand),
    /// List the entries under a path
    Ls(LsCommand),
    /// Recursively find files and folders under a path
    Find(FindCommand),
    /// Create a remote folder
    Mkdir(MkdirCommand),
    /// Download a remote file to a local path
    Get(GetCommand),
    /// Print a remote file to standard output
    Cat(CatCommand),
    /// Upload a local file
    Put(PutCommand),
    /// Delete a remote file or folder
    Rm(RmCommand),
    /// Download a remote subtree into a local directory
    Pull(PullCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = context::load_config(cli.config.as_deref())?;

    // Setup tracing; logs go to stderr so `cat` output stays clean
    let filter = match cli.verbose {
        0 => config.logging.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let ctx = CommandContext::new(config, cli.token.as_deref())?;

    match cli.command {
        Commands::Account(cmd) => cmd.execute(&ctx, format).await,
        Commands::Roots(cmd) => cmd.execute(&ctx, format).await,
        Commands::Ls(cmd) => cmd.execute(&ctx, format).await,
        Commands::Find(cmd) => cmd.execute(&ctx, format).await,
        Commands::Mkdir(cmd) => cmd.execute(&ctx, format).await,
        Commands::Get(cmd) => cmd.execute(&ctx, format).await,
        Commands::Cat(cmd) => cmd.execute(&ctx, format).await,
        Commands::Put(cmd) => cmd.execute(&ctx, format).await,
        Commands::Rm(cmd) => cmd.execute(&ctx, format).await,
        Commands::Pull(cmd) => cmd.execute(&ctx, format).await,
    }
}
