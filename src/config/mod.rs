//! Configuration
//!
//! Layered settings for the tree source, the interactive shell, the tree
//! builder and logging. See [`ConfigLoader`] for source precedence.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::tree::WalkerConfig;
use crate::views::{ContentTrust, RenderMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Document name appended to a tree URL that ends in `/`.
pub const DEFAULT_DOCUMENT_NAME: &str = "fileTree.json";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermfolioConfig {
    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub builder: WalkerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the tree document comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Local tree document
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// HTTP location of the tree document
    #[serde(default)]
    pub url: Option<String>,

    /// Directory to build the tree from in-process
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Fetch timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            file: None,
            url: None,
            source_dir: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TreeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured URL, with the default document name appended to a bare directory URL.
    pub fn document_url(&self) -> Option<String> {
        self.url.as_ref().map(|url| {
            if url.ends_with('/') {
                format!("{}{}", url, DEFAULT_DOCUMENT_NAME)
            } else {
                url.clone()
            }
        })
    }
}

/// Interactive shell settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    #[serde(default)]
    pub render: RenderMode,

    #[serde(default)]
    pub content_trust: ContentTrust,
}

fn default_prompt() -> String {
    "$".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            render: RenderMode::default(),
            content_trust: ContentTrust::default(),
        }
    }
}
