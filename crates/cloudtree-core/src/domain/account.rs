//! Account identity reported by the remote store

use serde::{Deserialize, Serialize};

/// Identity of the account that owns an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Provider-specific account identifier
    pub account_id: String,
    /// Name shown in the provider's UI
    pub display_name: String,
    /// Primary email address
    pub email: String,
    /// Whether the provider has verified the email address
    pub email_verified: bool,
    /// ISO country code, when reported
    pub country: Option<String>,
}
