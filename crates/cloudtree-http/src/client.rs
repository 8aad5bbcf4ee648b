//! Remote API HTTP client
//!
//! Provides a typed HTTP client for the store's JSON RPC API. Handles
//! authentication headers, endpoint construction, argument headers for the
//! content endpoints, and decoding of error responses.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cloudtree_core::domain::AccessToken;
//! use cloudtree_http::client::StoreClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = StoreClient::with_base_urls("https://api.dropboxapi.com", "https://content.dropboxapi.com");
//! let token = AccessToken::new("access-token-here")?;
//! let account = client.get_current_account(&token).await?;
//! println!("Hello, {}", account.display_name);
//! # Ok(())
//! # }
//! ```

use std::fmt::Write as _;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cloudtree_core::config::RemoteConfig;
use cloudtree_core::domain::{AccessToken, AccountInfo};

use crate::wire::WireAccount;
use crate::ApiError;

/// Header carrying the JSON argument of content endpoints
pub const API_ARG_HEADER: &str = "Dropbox-API-Arg";

/// Header carrying the JSON metadata of a download response
pub const API_RESULT_HEADER: &str = "Dropbox-API-Result";

const ACCOUNT_ENDPOINT: &str = "/2/users/get_current_account";

/// Error body returned by the API on non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_summary: Option<String>,
}

// ============================================================================
// StoreClient
// ============================================================================

/// HTTP client for the remote store API
///
/// Wraps `reqwest::Client` with base URL construction for the two API hosts.
/// It keeps connection pools but no credentials, so one instance can serve
/// any number of tokens concurrently.
#[derive(Debug, Clone)]
pub struct StoreClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL of the RPC endpoints
    api_url: String,
    /// Base URL of the content endpoints
    content_url: String,
    /// Total time allowed for an RPC call
    timeout: Option<Duration>,
}

impl StoreClient {
    /// Creates a client with a per-call timeout
    ///
    /// The timeout covers RPC calls end to end. Content transfers are only
    /// bounded by the connect timeout, since their duration depends on size.
    ///
    /// # Errors
    /// `ApiError::Network` if the HTTP client cannot be initialized
    pub fn new(
        api_url: impl Into<String>,
        content_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: trim_base(api_url.into()),
            content_url: trim_base(content_url.into()),
            timeout: Some(timeout),
        })
    }

    /// Creates a client from the `remote` configuration section
    pub fn from_config(config: &RemoteConfig) -> Result<Self, ApiError> {
        Self::new(
            config.api_url.clone(),
            config.content_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Creates a client with custom base URLs and no timeout (useful for testing)
    pub fn with_base_urls(api_url: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: trim_base(api_url.into()),
            content_url: trim_base(content_url.into()),
            timeout: None,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn content_url(&self) -> &str {
        &self.content_url
    }

    /// Creates an authenticated POST to an RPC endpoint
    ///
    /// # Arguments
    /// * `token` - Caller's access token
    /// * `endpoint` - Path relative to the API base URL (e.g. "/2/files/list_folder")
    pub fn rpc_request(&self, token: &AccessToken, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, endpoint);
        let request = self.client.post(url).bearer_auth(token.expose());
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    /// Creates an authenticated POST to a content endpoint
    ///
    /// `arg` is sent JSON-encoded in the [`API_ARG_HEADER`] header.
    ///
    /// # Errors
    /// `ApiError::InvalidRequest` if `arg` cannot be encoded
    pub fn content_request<A: Serialize>(
        &self,
        token: &AccessToken,
        endpoint: &str,
        arg: &A,
    ) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.content_url, endpoint);
        Ok(self
            .client
            .post(url)
            .bearer_auth(token.expose())
            .header(API_ARG_HEADER, header_safe_json(arg)?))
    }

    /// Sends a JSON RPC call and decodes the JSON result
    pub async fn rpc<B, R>(&self, token: &AccessToken, endpoint: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(endpoint, "RPC call");

        let response = self.rpc_request(token, endpoint).json(body).send().await?;
        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{endpoint}: {e}")))
    }

    /// Retrieves the account that owns `token`
    pub async fn get_current_account(&self, token: &AccessToken) -> Result<AccountInfo, ApiError> {
        let account: WireAccount = self
            .rpc(token, ACCOUNT_ENDPOINT, &serde_json::Value::Null)
            .await?;
        Ok(account.into())
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Passes successful responses through and decodes failures
///
/// The failure summary is the body's `error_summary` when present, the raw
/// body otherwise, and the status reason when the body is empty.
pub async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let summary = error_summary(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            body.trim().to_string()
        }
    });

    debug!(status = status.as_u16(), %summary, "API returned error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        summary,
    })
}

fn error_summary(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error_summary)
}

/// Encodes `value` as JSON using only ASCII characters
///
/// HTTP header values cannot carry raw non-ASCII bytes, so every non-ASCII
/// character (and DEL) is written as a `\uXXXX` escape, using surrogate
/// pairs outside the Basic Multilingual Plane.
pub fn header_safe_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    let json = serde_json::to_string(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() && c != '\x7f' {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                // Writing to a String cannot fail
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    Ok(out)
}
