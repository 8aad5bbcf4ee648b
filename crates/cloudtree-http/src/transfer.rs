//! Streaming upload and download through the content endpoints
//!
//! Both directions stream: uploads send the caller's reader as a chunked
//! request body, downloads hand back the response body as a reader. Neither
//! buffers a whole file in memory.
//!
//! Uploads use `mode: "add"` with `autorename: false`, so writing to an
//! existing path fails with a conflict instead of overwriting it.

use futures_util::TryStreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Body;
use serde::Serialize;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::debug;

use cloudtree_core::domain::{AccessToken, FileEntry, RemotePath};
use cloudtree_core::ports::{ByteStream, Download};

use crate::client::{check_status, StoreClient, API_RESULT_HEADER};
use crate::wire::WireMetadata;
use crate::ApiError;

const UPLOAD: &str = "/2/files/upload";
const DOWNLOAD: &str = "/2/files/download";

/// Argument of the upload endpoint
#[derive(Debug, Serialize)]
struct CommitInfo<'a> {
    path: &'a str,
    mode: &'static str,
    autorename: bool,
    mute: bool,
}

#[derive(Debug, Serialize)]
struct DownloadArg<'a> {
    path: &'a str,
}

/// Uploads `content` to `path`
///
/// # Returns
/// Metadata of the stored file as reported by the API
///
/// # Errors
///
/// - `ApiError::Status` if the API rejects the upload (e.g. the path exists)
/// - `ApiError::Network` if sending fails, including read errors on `content`
pub async fn upload(
    client: &StoreClient,
    token: &AccessToken,
    path: &RemotePath,
    content: ByteStream,
) -> Result<FileEntry, ApiError> {
    debug!(%path, "Uploading file");

    let arg = CommitInfo {
        path: path.as_str(),
        mode: "add",
        autorename: false,
        mute: false,
    };
    let body = Body::wrap_stream(ReaderStream::new(content));

    let response = client
        .content_request(token, UPLOAD, &arg)?
        .header(CONTENT_TYPE, "application/octet-stream")
        .body(body)
        .send()
        .await?;
    let response = check_status(response).await?;

    let meta: WireMetadata = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("upload result: {e}")))?;
    let file = meta.into_file()?;

    debug!(%path, size = file.size, rev = %file.rev, "Upload complete");
    Ok(file)
}

/// Opens a download of the file at `path`
///
/// The file's metadata comes from the `Dropbox-API-Result` response header;
/// the body is returned unread as the download stream.
///
/// # Errors
///
/// - `ApiError::Status` if the path does not exist or is not a file
/// - `ApiError::InvalidResponse` if the metadata header is missing or malformed
pub async fn download(
    client: &StoreClient,
    token: &AccessToken,
    path: &RemotePath,
) -> Result<Download, ApiError> {
    debug!(%path, "Opening download");

    let response = client
        .content_request(token, DOWNLOAD, &DownloadArg { path: path.as_str() })?
        .send()
        .await?;
    let response = check_status(response).await?;

    let raw_meta = response
        .headers()
        .get(API_RESULT_HEADER)
        .ok_or_else(|| ApiError::InvalidResponse(format!("missing {API_RESULT_HEADER} header")))?;
    let meta: WireMetadata = serde_json::from_slice(raw_meta.as_bytes())
        .map_err(|e| ApiError::InvalidResponse(format!("{API_RESULT_HEADER}: {e}")))?;
    let entry = meta.into_file()?;

    let body = response
        .bytes_stream()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
    let stream: ByteStream = Box::pin(StreamReader::new(body));

    Ok(Download { entry, stream })
}
