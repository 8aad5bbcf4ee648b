//! Account lookup use case

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::{AccessToken, AccountInfo, StoreError};
use crate::ports::IRemoteStore;

/// Use case for identifying the owner of an access token
#[derive(Clone)]
pub struct AccountUseCase {
    store: Arc<dyn IRemoteStore>,
}

impl AccountUseCase {
    pub fn new(store: Arc<dyn IRemoteStore>) -> Self {
        Self { store }
    }

    /// Returns the account the token was issued for
    ///
    /// Also serves as a cheap token check: an expired or revoked token fails
    /// here before any traversal is attempted.
    ///
    /// # Errors
    ///
    /// `StoreError::Account` if the store rejects the token
    #[instrument(skip_all)]
    pub async fn current_account(&self, token: &AccessToken) -> Result<AccountInfo, StoreError> {
        let account = self.store.get_account(token).await?;
        info!(account_id = %account.account_id, "resolved current account");
        Ok(account)
    }
}
