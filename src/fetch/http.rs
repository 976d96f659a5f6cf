//! reqwest-backed downloader.

use super::{staging_path, Downloader};
use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Downloads over HTTP(S) with a plain GET.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    http: reqwest::Client,
}

impl HttpDownloader {
    /// Create a downloader that identifies itself as this launcher version.
    ///
    /// `timeout` bounds the whole request including the body, so a server
    /// that stops sending turns into a retryable failure.
    pub fn new(version: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("yui-bootstrap/{version}"))
            .connect_timeout(Duration::from_secs(30).min(timeout))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let staging = staging_path(dest);
        if let Err(e) = write_body(resp, url, &staging).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e);
        }

        tokio::fs::rename(&staging, dest)
            .await
            .map_err(|e| FetchError::io("failed to move download onto", dest, e))?;

        debug!("Saved {} to {}", url, dest.display());
        Ok(())
    }
}

/// Stream the response body into `path`, flushed to disk.
async fn write_body(mut resp: reqwest::Response, url: &str, path: &Path) -> Result<(), FetchError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| FetchError::io("failed to create", path, e))?;

    while let Some(chunk) = resp.chunk().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })? {
        file.write_all(&chunk)
            .await
            .map_err(|e| FetchError::io("failed to write", path, e))?;
    }

    file.sync_all()
        .await
        .map_err(|e| FetchError::io("failed to sync", path, e))?;
    Ok(())
}
