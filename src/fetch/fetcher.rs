//! Retrying fetcher and the backup/restore swap used for in-place updates.
//!
//! Swap sequence for an update:
//!   1. copy the jar to a staging file and rename it onto the backup path
//!   2. download the new jar (the downloader renames it onto the jar path)
//!   3. on failure, rename the backup back onto the jar path
//!
//! Every step is a rename, so the jar path always holds either the old or
//! the new build.

use super::{staging_path, Downloader};
use crate::config::BootstrapConfig;
use crate::error::FetchError;
use crate::types::Channel;
use colored::Colorize;
use tracing::{debug, error, info, warn};

/// How an update attempt left the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    /// New build in place, previous build kept as backup.
    Updated,
    /// Download failed; the previous build is back in place.
    Failed,
    /// Download failed and no launchable build could be put back.
    Unlaunchable,
}

/// Downloads the bot jar on behalf of the launch loop.
pub struct Fetcher<'a, D> {
    config: &'a BootstrapConfig,
    downloader: D,
}

impl<'a, D: Downloader> Fetcher<'a, D> {
    pub fn new(config: &'a BootstrapConfig, downloader: D) -> Self {
        Self { config, downloader }
    }

    /// Download the jar from `channel` with bounded retries.
    ///
    /// Failures are reported on the console and logged; they never escape.
    pub async fn download(&self, channel: Channel) -> bool {
        let url = self.config.url_for(channel);
        let dest = &self.config.artifact_path;
        let retry = self.config.retry;

        for attempt in 1..=retry.attempts {
            if attempt == 1 {
                println!("Attempting to download the Bot, please wait...");
            } else {
                println!(
                    "Failed to download the Bot, will wait {} seconds and try again.",
                    retry.delay.as_secs()
                );
                tokio::time::sleep(retry.delay).await;
                println!("Attempting to download the Bot, attempt #{attempt}, please wait...");
            }

            // Only bites on a first-run fetch: during an update the old jar
            // stays at `dest`, so success rests on the downloader's contract.
            let result = match self.downloader.download(url, dest).await {
                Ok(()) if dest.exists() => Ok(()),
                Ok(()) => Err(FetchError::Missing(dest.clone())),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    println!("{}", "Successfully downloaded the Bot!".green());
                    info!("Downloaded {} build to {}", channel, dest.display());
                    return true;
                }
                Err(e) => {
                    println!("Encountered an error attempting to download the Bot.");
                    warn!(
                        "Download attempt {}/{} from {} failed: {}",
                        attempt, retry.attempts, url, e
                    );
                }
            }
        }

        error!("Giving up on {} after {} attempts", url, retry.attempts);
        false
    }

    /// Replace the jar with a fresh build from `channel`, rolling back on failure.
    pub async fn update(&self, channel: Channel) -> UpdateResult {
        let artifact = &self.config.artifact_path;

        let backed_up = if artifact.exists() {
            match self.back_up().await {
                Ok(()) => true,
                Err(e) => {
                    println!("Encountered a problem when trying to back up the Bot jar file.");
                    error!("Backup failed: {}", e);
                    return UpdateResult::Failed;
                }
            }
        } else {
            warn!(
                "{} is missing, updating without a backup",
                artifact.display()
            );
            false
        };

        if self.download(channel).await {
            println!("{}", "Update Successful!".green().bold());
            return UpdateResult::Updated;
        }

        println!(
            "{}",
            "Encountered an error while downloading the updated Bot. Reverting to old version."
                .yellow()
        );

        if backed_up {
            match self.restore().await {
                Ok(()) => {
                    info!("Restored {}", artifact.display());
                    return UpdateResult::Failed;
                }
                Err(e) => {
                    println!("Encountered a problem when trying to restore the Bot jar file.");
                    error!("Restore failed: {}", e);
                }
            }
        }

        if artifact.exists() {
            UpdateResult::Failed
        } else {
            UpdateResult::Unlaunchable
        }
    }

    /// Copy the jar onto the backup path, replacing any stale backup.
    async fn back_up(&self) -> Result<(), FetchError> {
        let artifact = &self.config.artifact_path;
        let backup = &self.config.backup_path;
        let staging = staging_path(backup);

        tokio::fs::copy(artifact, &staging)
            .await
            .map_err(|e| FetchError::io("failed to copy jar to", &staging, e))?;
        tokio::fs::rename(&staging, backup)
            .await
            .map_err(|e| FetchError::io("failed to move backup onto", backup, e))?;

        debug!("Backed up {} to {}", artifact.display(), backup.display());
        Ok(())
    }

    /// Move the backup back onto the jar path.
    async fn restore(&self) -> Result<(), FetchError> {
        let artifact = &self.config.artifact_path;
        tokio::fs::rename(&self.config.backup_path, artifact)
            .await
            .map_err(|e| FetchError::io("failed to restore backup onto", artifact, e))
    }
}
