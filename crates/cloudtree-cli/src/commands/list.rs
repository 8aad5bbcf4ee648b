//! Listing commands - roots, ls and find
//!
//! - `cloudtree roots` lists the folders at the top of the store
//! - `cloudtree ls [PATH] [-r]` lists the entries under a path
//! - `cloudtree find [PATH]` partitions a whole subtree into files and folders

use anyhow::{Context, Result};
use clap::Args;
use cloudtree_core::domain::TraversalRequest;

use crate::context::{remote_path, CommandContext};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct RootsCommand {}

impl RootsCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let folders = ctx
            .traversal
            .list_roots(&ctx.token)
            .await
            .context("Failed to list root folders")?;

        formatter.folders(&folders);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct LsCommand {
    /// Remote path to list
    #[arg(default_value = "/")]
    pub path: String,

    /// Include every descendant level
    #[arg(short, long)]
    pub recursive: bool,
}

impl LsCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let request = TraversalRequest::new(remote_path(&self.path)?, self.recursive);

        let entries = ctx
            .traversal
            .list_tree(&ctx.token, &request)
            .await
            .with_context(|| format!("Failed to list {}", self.path))?;

        formatter.entries(&entries);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct FindCommand {
    /// Remote path to search under
    #[arg(default_value = "/")]
    pub path: String,
}

impl FindCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let found = ctx
            .traversal
            .find_files_and_dirs(&ctx.token, &remote_path(&self.path)?)
            .await
            .with_context(|| format!("Failed to search {}", self.path))?;

        formatter.classified(&found);
        Ok(())
    }
}
