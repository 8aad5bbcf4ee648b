//! Pull command - Mirror a remote subtree into a local directory
//!
//! Provides the `cloudtree pull` CLI command which:
//! 1. Lists the remote subtree once
//! 2. Creates every folder under the local directory
//! 3. Downloads every file, overwriting what is already there
//! 4. Reports totals and any per-entry failures

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::context::{expand_tilde, remote_path, CommandContext};
use crate::output::{get_formatter, plural, OutputFormat};

#[derive(Debug, Args)]
pub struct PullCommand {
    /// Remote folder to mirror
    pub remote: String,

    /// Local directory (defaults to transfer.download_dir from the config)
    pub local_dir: Option<PathBuf>,
}

impl PullCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let remote_root = remote_path(&self.remote)?;
        let local_root = expand_tilde(
            self.local_dir
                .as_deref()
                .unwrap_or(&ctx.config.transfer.download_dir),
        );

        formatter.info(&format!(
            "Pulling {} into {}...",
            remote_root,
            local_root.display()
        ));

        let report = ctx
            .mirror
            .pull(&ctx.token, &remote_root, &local_root)
            .await
            .with_context(|| format!("Failed to list {remote_root}"))?;

        formatter.mirror_report(&report);

        if !report.is_clean() {
            bail!(
                "Pull finished with {} error{}",
                report.errors.len(),
                plural(report.errors.len())
            );
        }
        Ok(())
    }
}
