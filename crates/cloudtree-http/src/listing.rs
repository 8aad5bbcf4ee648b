//! Folder listing and metadata queries
//!
//! `list_folder` returns one page of entries and a cursor; while `has_more`
//! is set the next page is fetched from `list_folder/continue` with that
//! cursor. All pages are accumulated before returning, so callers see a
//! complete listing or an error, never a partial one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cloudtree_core::domain::{AccessToken, RemotePath};
//! use cloudtree_http::{client::StoreClient, listing};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = StoreClient::with_base_urls("https://api.dropboxapi.com", "https://content.dropboxapi.com");
//! let token = AccessToken::new("access-token-here")?;
//! let entries = listing::list_folder(&client, &token, &RemotePath::root(), true).await?;
//! println!("{} entries", entries.len());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use cloudtree_core::domain::{AccessToken, Entry, RemotePath};

use crate::client::StoreClient;
use crate::wire::WireMetadata;
use crate::ApiError;

const LIST_FOLDER: &str = "/2/files/list_folder";
const LIST_FOLDER_CONTINUE: &str = "/2/files/list_folder/continue";
const GET_METADATA: &str = "/2/files/get_metadata";

#[derive(Debug, Serialize)]
struct ListFolderArg<'a> {
    path: &'a str,
    recursive: bool,
}

#[derive(Debug, Serialize)]
struct ListFolderContinueArg<'a> {
    cursor: &'a str,
}

#[derive(Debug, Serialize)]
struct PathArg<'a> {
    path: &'a str,
}

/// One page of a folder listing
#[derive(Debug, Deserialize)]
struct ListFolderPage {
    #[serde(default)]
    entries: Vec<WireMetadata>,
    cursor: String,
    has_more: bool,
}

/// Lists the entries under `path`, following the cursor until exhausted
///
/// The root is addressed with an empty path. Entries are returned in the
/// order the API reports them.
///
/// # Errors
///
/// - `ApiError::Status` if the API rejects a page request
/// - `ApiError::InvalidResponse` if a page or an entry is malformed
/// - `ApiError::Network` on transport failures
pub async fn list_folder(
    client: &StoreClient,
    token: &AccessToken,
    path: &RemotePath,
    recursive: bool,
) -> Result<Vec<Entry>, ApiError> {
    debug!(%path, recursive, "Starting folder listing");

    let arg = ListFolderArg {
        path: path.as_str(),
        recursive,
    };
    let mut page: ListFolderPage = client.rpc(token, LIST_FOLDER, &arg).await?;
    let mut entries = convert_entries(std::mem::take(&mut page.entries))?;

    let mut page_count: u32 = 1;
    while page.has_more {
        if page.cursor.is_empty() {
            return Err(ApiError::InvalidResponse(
                "has_more set without a cursor".into(),
            ));
        }

        page_count += 1;
        debug!(page = page_count, "Following listing cursor");

        let arg = ListFolderContinueArg {
            cursor: &page.cursor,
        };
        page = client.rpc(token, LIST_FOLDER_CONTINUE, &arg).await?;
        entries.extend(convert_entries(std::mem::take(&mut page.entries))?);
    }

    debug!(
        total_entries = entries.len(),
        total_pages = page_count,
        "Folder listing complete"
    );
    Ok(entries)
}

/// Fetches the metadata of the entry at `path`
///
/// # Errors
///
/// `ApiError::Status` if the path does not exist
pub async fn get_metadata(
    client: &StoreClient,
    token: &AccessToken,
    path: &RemotePath,
) -> Result<Entry, ApiError> {
    debug!(%path, "Fetching metadata");

    let meta: WireMetadata = client
        .rpc(token, GET_METADATA, &PathArg { path: path.as_str() })
        .await?;
    meta.into_entry()
}

fn convert_entries(raw: Vec<WireMetadata>) -> Result<Vec<Entry>, ApiError> {
    raw.into_iter().map(WireMetadata::into_entry).collect()
}
