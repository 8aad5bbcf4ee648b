//! Account command - Show who owns the access token

use anyhow::{Context, Result};
use clap::Args;

use crate::context::CommandContext;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct AccountCommand {}

impl AccountCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);

        let account = ctx
            .account
            .current_account(&ctx.token)
            .await
            .context("Failed to fetch account")?;

        formatter.account(&account);
        Ok(())
    }
}
