//! Transfer commands - get, cat, put, rm and mkdir

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use cloudtree_core::domain::{Entry, FileEntry, RemotePath};
use cloudtree_core::ports::ByteStream;
use tracing::info;

use crate::context::{remote_path, CommandContext};
use crate::output::{format_bytes, get_formatter, OutputFormat};

/// Resolves `path` and requires it to be a file
async fn remote_file(ctx: &CommandContext, path: &RemotePath) -> Result<FileEntry> {
    let entry = ctx
        .traversal
        .metadata(&ctx.token, path)
        .await
        .with_context(|| format!("Failed to look up {path}"))?;

    match entry {
        Entry::File(file) => Ok(file),
        Entry::Folder(_) => bail!("{path} is a folder, not a file"),
        Entry::Other(other) => bail!("{path} is a '{}' entry, not a file", other.tag),
    }
}

#[derive(Debug, Args)]
pub struct GetCommand {
    /// Remote file to download
    pub remote: String,

    /// Local destination (parent folders are created)
    pub local: PathBuf,
}

impl GetCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let file = remote_file(ctx, &remote_path(&self.remote)?).await?;

        let outcome = ctx
            .transfer
            .download_to_local(&ctx.token, &self.local, &file)
            .await
            .with_context(|| format!("Failed to download {}", file.display_path))?;

        formatter.done(
            &format!(
                "Downloaded {} to {} ({})",
                file.display_path,
                self.local.display(),
                format_bytes(outcome.bytes_transferred)
            ),
            serde_json::json!({
                "remote": file.display_path,
                "local": self.local,
                "bytes": outcome.bytes_transferred,
            }),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct CatCommand {
    /// Remote file to print
    pub remote: String,
}

impl CatCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let file = remote_file(ctx, &remote_path(&self.remote)?).await?;

        let limit = ctx.config.max_buffer_bytes();
        if file.size > limit {
            bail!(
                "{} is {}, larger than the {} buffer limit; use 'get' instead",
                file.display_path,
                format_bytes(file.size),
                format_bytes(limit)
            );
        }

        let text = ctx
            .transfer
            .download_to_buffer(&ctx.token, &file)
            .await
            .with_context(|| format!("Failed to download {}", file.display_path))?;

        formatter.content(&file, &text);
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct PutCommand {
    /// Local file to upload
    pub local: PathBuf,

    /// Remote destination path
    pub remote: String,

    /// Delete whatever is at the destination before uploading
    #[arg(long)]
    pub replace: bool,
}

impl PutCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let destination = remote_path(&self.remote)?;
        if destination.is_root() {
            bail!("Cannot upload to the store root; give a file path");
        }

        let file = tokio::fs::File::open(&self.local)
            .await
            .with_context(|| format!("Failed to open {}", self.local.display()))?;
        let content: ByteStream = Box::pin(file);

        let (outcome, replaced) = if self.replace {
            let result = ctx
                .transfer
                .replace(&ctx.token, &destination, content)
                .await
                .with_context(|| format!("Failed to replace {destination}"))?;
            let replaced = result.delete.is_deleted();
            (result.upload, replaced)
        } else {
            let outcome = ctx
                .transfer
                .upload(&ctx.token, &destination, content)
                .await
                .with_context(|| format!("Failed to upload {destination}"))?;
            (outcome, false)
        };

        info!(bytes = outcome.bytes_transferred, replaced, "Upload finished");

        formatter.done(
            &format!(
                "{} {} ({})",
                if replaced { "Replaced" } else { "Uploaded" },
                outcome.remote_path,
                format_bytes(outcome.bytes_transferred)
            ),
            serde_json::json!({
                "remote": outcome.remote_path,
                "bytes": outcome.bytes_transferred,
                "replaced": replaced,
            }),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct RmCommand {
    /// Remote file or folder to delete
    pub remote: String,
}

impl RmCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let target = remote_path(&self.remote)?;
        if target.is_root() {
            bail!("Refusing to delete the store root");
        }

        ctx.transfer
            .remove(&ctx.token, &target)
            .await
            .with_context(|| format!("Failed to delete {target}"))?;

        formatter.done(
            &format!("Deleted {target}"),
            serde_json::json!({"deleted": target}),
        );
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct MkdirCommand {
    /// Remote folder to create
    pub remote: String,
}

impl MkdirCommand {
    pub async fn execute(&self, ctx: &CommandContext, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format);
        let target = remote_path(&self.remote)?;

        let folder = ctx
            .transfer
            .create_folder(&ctx.token, &target)
            .await
            .with_context(|| format!("Failed to create {target}"))?;

        formatter.done(
            &format!("Created {}/", folder.display_path),
            serde_json::to_value(&folder)?,
        );
        Ok(())
    }
}
