//! Integration tests for uploads, downloads, replace, folder creation and deletion

use std::io::Cursor;
use std::sync::Arc;

use cloudtree_core::domain::{DeleteStep, FileEntry, RemotePath, StoreError};
use cloudtree_core::ports::{ByteStream, IRemoteStore};
use cloudtree_core::usecases::TransferEngine;
use cloudtree_http::HttpRemoteStore;
use cloudtree_local::LocalFileSink;
use tokio::io::AsyncReadExt;
use wiremock::matchers::{body_bytes, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

fn stream_of(bytes: &[u8]) -> ByteStream {
    Box::pin(Cursor::new(bytes.to_vec()))
}

fn engine(store: HttpRemoteStore) -> TransferEngine {
    TransferEngine::new(Arc::new(store), Arc::new(LocalFileSink::new()))
}

async fn mount_upload(server: &MockServer, path_display: &str, content: &[u8]) {
    Mock::given(method("POST"))
        .and(path("/2/files/upload"))
        .and(header("Content-Type", "application/octet-stream"))
        .and(common::api_arg(serde_json::json!({
            "path": path_display,
            "mode": "add",
            "autorename": false,
            "mute": false
        })))
        .and(body_bytes(content.to_vec()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::file_json(path_display, content.len() as u64)),
        )
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Download tests
// ============================================================================

#[tokio::test]
async fn test_download_streams_content_and_metadata() {
    let (server, store) = common::setup_store().await;
    let content = b"Hello, remote store! This is test content.";
    common::mount_download(&server, "/Docs/hello.txt", content).await;

    let mut download = store
        .download(&common::token(), &RemotePath::new("/Docs/hello.txt").unwrap())
        .await
        .expect("download failed");

    assert_eq!(download.entry.path.as_str(), "/docs/hello.txt");
    assert_eq!(download.entry.size, content.len() as u64);

    let mut data = Vec::new();
    download.stream.read_to_end(&mut data).await.unwrap();
    assert_eq!(data, content);
}

#[tokio::test]
async fn test_download_large_and_empty_files() {
    let (server, store) = common::setup_store().await;
    let large: Vec<u8> = (0..3 * 1_048_576u32).map(|i| (i % 251) as u8).collect();
    common::mount_download(&server, "/large.bin", &large).await;
    common::mount_download(&server, "/empty.bin", &[]).await;

    let transfer = engine(store);

    for (p, expected) in [("/large.bin", large.as_slice()), ("/empty.bin", &[][..])] {
        let entry = FileEntry::new(&RemotePath::new(p).unwrap(), expected.len() as u64, "rev");
        let mut stream = transfer.download(&common::token(), &entry).await.unwrap();
        let mut data = Vec::new();
        stream.read_to_end(&mut data).await.unwrap();
        assert_eq!(data.len(), expected.len(), "length of {p}");
        assert_eq!(data, expected, "content of {p}");
    }
}

#[tokio::test]
async fn test_download_missing_path_maps_to_download_error() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/download"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(common::error_json("path/not_found/..")),
        )
        .mount(&server)
        .await;

    let err = store
        .download(&common::token(), &RemotePath::new("/missing.txt").unwrap())
        .await
        .unwrap_err();

    match err {
        StoreError::Download { path, reason } => {
            assert_eq!(path, "/missing.txt");
            assert_eq!(reason, "path/not_found/..");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_download_without_result_header_is_invalid() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/download"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
        .mount(&server)
        .await;

    let err = store
        .download(&common::token(), &RemotePath::new("/a.txt").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Download { .. }));
}

#[tokio::test]
async fn test_download_to_local_and_buffer() {
    let (server, store) = common::setup_store().await;
    common::mount_download(&server, "/Notes/Todo.md", "- café\n- tea\n".as_bytes()).await;

    let transfer = engine(store);
    let entry = FileEntry::new(&RemotePath::new("/Notes/Todo.md").unwrap(), 14, "rev");
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/deeper/Todo.md");

    let outcome = transfer
        .download_to_local(&common::token(), &target, &entry)
        .await
        .unwrap();
    assert_eq!(outcome.bytes_transferred, 14);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "- café\n- tea\n");

    let text = transfer
        .download_to_buffer(&common::token(), &entry)
        .await
        .unwrap();
    assert_eq!(text, "- café\n- tea\n");

    // Both downloads address the file by its lowercase identity path
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let arg = common::sent_api_arg(request).unwrap();
        assert_eq!(arg, serde_json::json!({"path": "/notes/todo.md"}));
    }
}

#[tokio::test]
async fn test_download_non_ascii_path_argument() {
    let (server, store) = common::setup_store().await;
    common::mount_download(&server, "/Fotos/Año/playa.jpg", b"jpeg").await;

    let download = store
        .download(&common::token(), &RemotePath::new("/Fotos/Año/playa.jpg").unwrap())
        .await
        .expect("download with non-ASCII path failed");

    assert_eq!(download.entry.display_path, "/Fotos/Año/playa.jpg");
}

// ============================================================================
// Upload tests
// ============================================================================

#[tokio::test]
async fn test_upload_streams_body() {
    let (server, store) = common::setup_store().await;
    mount_upload(&server, "/Docs/new.txt", b"Small file content for upload test").await;

    let outcome = engine(store)
        .upload(
            &common::token(),
            &RemotePath::new("/Docs/new.txt").unwrap(),
            stream_of(b"Small file content for upload test"),
        )
        .await
        .expect("upload failed");

    assert!(outcome.success);
    assert_eq!(outcome.bytes_transferred, 34);
}

#[tokio::test]
async fn test_upload_conflict_maps_to_upload_error() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/upload"))
        .respond_with(ResponseTemplate::new(409).set_body_json(common::error_json(
            "path/conflict/file/..",
        )))
        .mount(&server)
        .await;

    let err = store
        .upload(
            &common::token(),
            &RemotePath::new("/exists.txt").unwrap(),
            stream_of(b"x"),
        )
        .await
        .unwrap_err();

    match err {
        StoreError::Upload { reason, .. } => assert_eq!(reason, "path/conflict/file/.."),
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Replace / delete / create folder
// ============================================================================

#[tokio::test]
async fn test_replace_missing_path_swallows_delete_failure() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/delete_v2"))
        .and(body_json(serde_json::json!({"path": "/missing.txt"})))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(common::error_json("path_lookup/not_found/..")),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_upload(&server, "/missing.txt", b"hello").await;

    let outcome = engine(store)
        .replace(
            &common::token(),
            &RemotePath::new("/missing.txt").unwrap(),
            stream_of(b"hello"),
        )
        .await
        .expect("replace failed");

    assert!(matches!(
        outcome.delete,
        DeleteStep::Skipped(StoreError::Delete { .. })
    ));
    assert_eq!(outcome.upload.bytes_transferred, 5);
}

#[tokio::test]
async fn test_replace_existing_path() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/delete_v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": common::file_json("/config.yaml", 9)
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_upload(&server, "/config.yaml", b"new: true").await;

    let outcome = engine(store)
        .replace(
            &common::token(),
            &RemotePath::new("/config.yaml").unwrap(),
            stream_of(b"new: true"),
        )
        .await
        .unwrap();

    assert!(outcome.delete.is_deleted());
    assert!(outcome.upload.success);
}

#[tokio::test]
async fn test_delete_returns_removed_entry() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/delete_v2"))
        .and(body_json(serde_json::json!({"path": "/Old"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": common::folder_json("/Old")
        })))
        .mount(&server)
        .await;

    let removed = store
        .delete(&common::token(), &RemotePath::new("/Old").unwrap())
        .await
        .unwrap();

    assert_eq!(removed.path().unwrap().as_str(), "/old");
    assert!(removed.as_folder().is_some());
}

#[tokio::test]
async fn test_create_folder() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/create_folder_v2"))
        .and(body_json(serde_json::json!({"path": "/Projects", "autorename": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metadata": {"name": "Projects", "path_lower": "/projects",
                         "path_display": "/Projects", "id": "id:proj"}
        })))
        .mount(&server)
        .await;

    let folder = store
        .create_folder(&common::token(), &RemotePath::new("/Projects").unwrap())
        .await
        .unwrap();

    assert_eq!(folder.path.as_str(), "/projects");
    assert_eq!(folder.id.as_deref(), Some("id:proj"));
}

#[tokio::test]
async fn test_create_folder_conflict() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("POST"))
        .and(path("/2/files/create_folder_v2"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(common::error_json("path/conflict/folder/..")),
        )
        .mount(&server)
        .await;

    let err = store
        .create_folder(&common::token(), &RemotePath::new("/Projects").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::CreateFolder { .. }));
}
