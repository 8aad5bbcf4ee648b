//! Shared wiring for CLI commands
//!
//! Loads the configuration, validates the access token, and builds the
//! adapters and use cases every command draws from.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use cloudtree_core::config::Config;
use cloudtree_core::domain::{AccessToken, RemotePath};
use cloudtree_core::usecases::{AccountUseCase, MirrorUseCase, TransferEngine, TraversalEngine};
use cloudtree_http::{HttpRemoteStore, StoreClient};
use cloudtree_local::LocalFileSink;
use tracing::{debug, info};

/// Loads the configuration from `path`, or from the default location
///
/// An explicit path must exist and parse; the default location falls back
/// to built-in defaults when absent. The result is validated either way.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(p) => {
            let p = PathBuf::from(p);
            Config::load(&p).with_context(|| format!("Failed to load config {}", p.display()))?
        }
        None => Config::load_or_default(&Config::default_path()),
    };

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid configuration:\n  {}", details.join("\n  "));
    }

    Ok(config)
}

/// Configuration, credentials and use cases for one CLI invocation
pub struct CommandContext {
    pub config: Config,
    pub token: AccessToken,
    pub traversal: TraversalEngine,
    pub transfer: TransferEngine,
    pub account: AccountUseCase,
    pub mirror: MirrorUseCase,
}

impl CommandContext {
    pub fn new(config: Config, token: Option<&str>) -> Result<Self> {
        let Some(raw) = token else {
            bail!("No access token. Pass --token or set CLOUDTREE_TOKEN.");
        };
        let token = AccessToken::new(raw).context("Invalid access token")?;

        let client = StoreClient::from_config(&config.remote).context("Failed to create HTTP client")?;
        info!(api_url = %client.api_url(), "Using remote store");

        let store = Arc::new(HttpRemoteStore::new(client));
        let sink = Arc::new(LocalFileSink::new());

        let traversal = TraversalEngine::new(store.clone());
        let transfer = TransferEngine::new(store.clone(), sink);
        let account = AccountUseCase::new(store);
        let mirror = MirrorUseCase::new(traversal.clone(), transfer.clone());

        debug!("Command context ready");
        Ok(Self {
            config,
            token,
            traversal,
            transfer,
            account,
            mirror,
        })
    }
}

/// Parses a user-supplied remote path
pub fn remote_path(raw: &str) -> Result<RemotePath> {
    RemotePath::new(raw).with_context(|| format!("Invalid remote path '{raw}'"))
}

/// Expand tilde (~) in a path to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
