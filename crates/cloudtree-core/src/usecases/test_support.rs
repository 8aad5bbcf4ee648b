//! In-memory port implementations shared by the use case tests

use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf};

use crate::domain::{
    AccessToken, AccountInfo, Entry, FileEntry, FolderEntry, RemotePath, StoreError,
};
use crate::ports::{ByteStream, Download, ILocalSink, IRemoteStore, LocalHandle};

pub fn token() -> AccessToken {
    AccessToken::new("test-token").unwrap()
}

pub fn path(p: &str) -> RemotePath {
    RemotePath::new(p).unwrap()
}

pub fn stream_of(bytes: impl Into<Vec<u8>>) -> ByteStream {
    Box::pin(Cursor::new(bytes.into()))
}

// ============================================================================
// InMemoryStore
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    File { display: RemotePath, content: Vec<u8>, rev: u32 },
    Folder { display: RemotePath },
}

/// Failure switches for [`InMemoryStore`]
#[derive(Debug, Default)]
pub struct Faults {
    pub list: Option<StoreError>,
    pub delete: Option<StoreError>,
    pub upload: Option<StoreError>,
    pub download: Option<StoreError>,
    /// Downloads yield this many bytes and then fail
    pub interrupt_download_after: Option<usize>,
}

/// Remote store kept in a sorted map keyed by lowercase path
///
/// Uploads use "add" semantics: writing to an existing path is rejected,
/// which is what makes delete-then-create necessary for replace.
#[derive(Default)]
pub struct InMemoryStore {
    nodes: Mutex<BTreeMap<String, Node>>,
    extra: Mutex<Vec<Entry>>,
    calls: Mutex<Vec<String>>,
    pub faults: Mutex<Faults>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_folder(&self, p: &str) {
        let display = path(p);
        self.nodes.lock().unwrap().insert(
            display.to_lowercase().as_str().to_string(),
            Node::Folder { display },
        );
    }

    pub fn add_file(&self, p: &str, content: &[u8]) {
        let display = path(p);
        self.nodes.lock().unwrap().insert(
            display.to_lowercase().as_str().to_string(),
            Node::File {
                display,
                content: content.to_vec(),
                rev: 1,
            },
        );
    }

    /// Appends an entry reported by every listing after the stored nodes
    pub fn add_listing_extra(&self, entry: Entry) {
        self.extra.lock().unwrap().push(entry);
    }

    pub fn content(&self, p: &str) -> Option<Vec<u8>> {
        match self.nodes.lock().unwrap().get(path(p).to_lowercase().as_str()) {
            Some(Node::File { content, .. }) => Some(content.clone()),
            _ => None,
        }
    }

    pub fn exists(&self, p: &str) -> bool {
        self.nodes
            .lock()
            .unwrap()
            .contains_key(path(p).to_lowercase().as_str())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn to_entry(node: &Node) -> Entry {
        match node {
            Node::File {
                display,
                content,
                rev,
            } => FileEntry::new(display, content.len() as u64, format!("rev{rev}")).into(),
            Node::Folder { display } => FolderEntry::new(display).into(),
        }
    }
}

#[async_trait::async_trait]
impl IRemoteStore for InMemoryStore {
    async fn list_entries(
        &self,
        _token: &AccessToken,
        path: &RemotePath,
        recursive: bool,
    ) -> Result<Vec<Entry>, StoreError> {
        self.record(format!("list {path} recursive={recursive}"));
        if let Some(err) = self.faults.lock().unwrap().list.take() {
            return Err(err);
        }

        let key = path.to_lowercase();
        let nodes = self.nodes.lock().unwrap();

        if !key.is_root() && !nodes.contains_key(key.as_str()) {
            return Err(StoreError::list(path, "path/not_found/"));
        }

        let prefix = format!("{}/", key.as_str());
        let mut entries: Vec<Entry> = nodes
            .iter()
            .filter(|(k, _)| {
                k.starts_with(&prefix) && (recursive || !k[prefix.len()..].contains('/'))
            })
            .map(|(_, node)| Self::to_entry(node))
            .collect();
        entries.extend(self.extra.lock().unwrap().iter().cloned());
        Ok(entries)
    }

    async fn get_metadata(
        &self,
        _token: &AccessToken,
        path: &RemotePath,
    ) -> Result<Entry, StoreError> {
        self.record(format!("metadata {path}"));
        self.nodes
            .lock()
            .unwrap()
            .get(path.to_lowercase().as_str())
            .map(Self::to_entry)
            .ok_or_else(|| StoreError::list(path, "path/not_found/"))
    }

    async fn create_folder(
        &self,
        _token: &AccessToken,
        path: &RemotePath,
    ) -> Result<FolderEntry, StoreError> {
        self.record(format!("create_folder {path}"));
        let mut nodes = self.nodes.lock().unwrap();
        let key = path.to_lowercase().as_str().to_string();
        if nodes.contains_key(&key) {
            return Err(StoreError::create_folder(path, "path/conflict/folder/"));
        }
        nodes.insert(
            key,
            Node::Folder {
                display: path.clone(),
            },
        );
        Ok(FolderEntry::new(path))
    }

    async fn upload(
        &self,
        _token: &AccessToken,
        path: &RemotePath,
        mut content: ByteStream,
    ) -> Result<FileEntry, StoreError> {
        self.record(format!("upload {path}"));
        let fault = self.faults.lock().unwrap().upload.take();
        if let Some(err) = fault {
            return Err(err);
        }

        let mut bytes = Vec::new();
        content
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| StoreError::upload(path, e))?;

        let mut nodes = self.nodes.lock().unwrap();
        let key = path.to_lowercase().as_str().to_string();
        if nodes.contains_key(&key) {
            return Err(StoreError::upload(path, "path/conflict/file/"));
        }
        let entry = FileEntry::new(path, bytes.len() as u64, "rev1");
        nodes.insert(
            key,
            Node::File {
                display: path.clone(),
                content: bytes,
                rev: 1,
            },
        );
        Ok(entry)
    }

    async fn download(
        &self,
        _token: &AccessToken,
        path: &RemotePath,
    ) -> Result<Download, StoreError> {
        self.record(format!("download {path}"));
        let (interrupt, fault) = {
            let mut faults = self.faults.lock().unwrap();
            (faults.interrupt_download_after, faults.download.take())
        };
        if let Some(err) = fault {
            return Err(err);
        }

        let node = self
            .nodes
            .lock()
            .unwrap()
            .get(path.to_lowercase().as_str())
            .cloned();

        match node {
            Some(Node::File {
                display, content, ..
            }) => {
                let entry = FileEntry::new(&display, content.len() as u64, "rev1");
                let stream: ByteStream = match interrupt {
                    Some(n) => Box::pin(InterruptedReader {
                        data: content[..n.min(content.len())].to_vec(),
                        pos: 0,
                    }),
                    None => stream_of(content),
                };
                Ok(Download { entry, stream })
            }
            _ => Err(StoreError::download(path, "path/not_found/")),
        }
    }

    async fn delete(&self, _token: &AccessToken, path: &RemotePath) -> Result<Entry, StoreError> {
        self.record(format!("delete {path}"));
        if let Some(err) = self.faults.lock().unwrap().delete.take() {
            return Err(err);
        }

        let mut nodes = self.nodes.lock().unwrap();
        let key = path.to_lowercase().as_str().to_string();
        let removed = nodes
            .remove(&key)
            .ok_or_else(|| StoreError::delete(path, "path_lookup/not_found/"))?;
        let prefix = format!("{key}/");
        nodes.retain(|k, _| !k.starts_with(&prefix));
        Ok(Self::to_entry(&removed))
    }

    async fn get_account(&self, _token: &AccessToken) -> Result<AccountInfo, StoreError> {
        self.record("account".to_string());
        Ok(AccountInfo {
            account_id: "dbid:test".to_string(),
            display_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            email_verified: true,
            country: Some("US".to_string()),
        })
    }
}

/// Yields its data, then fails as if the connection dropped
struct InterruptedReader {
    data: Vec<u8>,
    pos: usize,
}

impl AsyncRead for InterruptedReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        if self.pos < self.data.len() {
            let n = (self.data.len() - self.pos).min(buf.remaining());
            let start = self.pos;
            buf.put_slice(&self.data[start..start + n]);
            self.pos += n;
            return Poll::Ready(Ok(()));
        }
        Poll::Ready(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        )))
    }
}

// ============================================================================
// CountingSink
// ============================================================================

/// Local sink that keeps files in memory and counts open handles
#[derive(Default)]
pub struct CountingSink {
    pub open_handles: Arc<AtomicUsize>,
    pub handles_created: AtomicUsize,
    pub files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    pub dirs: Mutex<Vec<PathBuf>>,
    pub fail_create: bool,
    pub fail_write: bool,
}

impl CountingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_writes() -> Arc<Self> {
        Arc::new(Self {
            fail_write: true,
            ..Self::default()
        })
    }

    pub fn failing_creates() -> Arc<Self> {
        Arc::new(Self {
            fail_create: true,
            ..Self::default()
        })
    }

    pub fn open(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    pub fn file(&self, p: &Path) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(p).cloned()
    }
}

#[async_trait::async_trait]
impl ILocalSink for CountingSink {
    async fn create_with_parents(&self, path: &Path) -> Result<LocalHandle, StoreError> {
        if self.fail_create {
            return Err(StoreError::local_write(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }

        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Vec::new());
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        self.handles_created.fetch_add(1, Ordering::SeqCst);

        Ok(Box::pin(CountingHandle {
            path: path.to_path_buf(),
            files: Arc::clone(&self.files),
            open_handles: Arc::clone(&self.open_handles),
            fail_write: self.fail_write,
        }))
    }

    async fn ensure_dir(&self, path: &Path) -> Result<(), StoreError> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

struct CountingHandle {
    path: PathBuf,
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    open_handles: Arc<AtomicUsize>,
    fail_write: bool,
}

impl AsyncWrite for CountingHandle {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        if self.fail_write {
            return Poll::Ready(Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "no space left on device",
            )));
        }
        self.files
            .lock()
            .unwrap()
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl Drop for CountingHandle {
    fn drop(&mut self) {
        self.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}
