//! Tree document sources and the one-shot loader.

use super::TreeSlot;
use crate::error::ApiError;
use crate::tree::{FileTree, TreeBuilder};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Something a tree can be loaded from
#[async_trait]
pub trait TreeSource: Send + Sync {
    /// Human-readable location, used in logs and error messages.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<FileTree, ApiError>;
}

/// Tree document on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl TreeSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<FileTree, ApiError> {
        let bytes = tokio::fs::read(&self.path).await?;
        FileTree::from_slice(&bytes)
    }
}

/// Tree document served over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self { url, timeout }
    }
}

#[async_trait]
impl TreeSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<FileTree, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::Fetch(format!("Failed to create HTTP client: {}", e)))?;
        let response = client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Fetch(format!("GET {} failed: {}", self.url, e)))?
            .error_for_status()
            .map_err(|e| ApiError::Fetch(e.to_string()))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Fetch(format!("Failed to read response body: {}", e)))?;
        FileTree::from_slice(&body)
    }
}

/// Tree built in-process from a source directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    builder: TreeBuilder,
}

impl DirectorySource {
    pub fn new(builder: TreeBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl TreeSource for DirectorySource {
    fn describe(&self) -> String {
        self.builder.source().display().to_string()
    }

    async fn fetch(&self) -> Result<FileTree, ApiError> {
        let builder = self.builder.clone();
        tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(|e| ApiError::Fetch(format!("Tree builder task failed: {}", e)))?
    }
}

/// Read and validate a tree document synchronously.
pub fn load_document(path: &Path) -> Result<FileTree, ApiError> {
    let bytes = std::fs::read(path)?;
    FileTree::from_slice(&bytes)
}

/// Fetch from `source` and install the result into `slot`.
///
/// On failure the slot is marked unavailable and the error is returned.
pub async fn load_into(slot: &TreeSlot, source: &dyn TreeSource) -> Result<(), ApiError> {
    match source.fetch().await {
        Ok(tree) => {
            let stats = tree.stats();
            info!(
                source = %source.describe(),
                folders = stats.folders,
                files = stats.files,
                "Installed file tree"
            );
            slot.install(tree);
            Ok(())
        }
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "Failed to load file tree");
            slot.fail(e.to_string());
            Err(e)
        }
    }
}
