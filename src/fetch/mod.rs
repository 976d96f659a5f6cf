//! Artifact downloads: the HTTP primitive and the retrying, crash-safe fetcher
//! built on top of it.

pub mod fetcher;
pub mod http;

pub use fetcher::{Fetcher, UpdateResult};
pub use http::HttpDownloader;

use crate::error::FetchError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Transfers one remote resource to a local path.
///
/// Implementations must either leave `dest` untouched or replace it with the
/// complete resource; a half-written file must never appear at `dest`.
/// `Ok` means `dest` now holds the new resource, even when an older file
/// was already there.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError>;
}

/// Sibling file that receives bytes before they are renamed onto `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
