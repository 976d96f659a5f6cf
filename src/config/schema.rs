//! Launcher constants: where the bot lives, where it comes from, how it runs.

use crate::types::Channel;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix applied to the artifact's file name to derive the backup path.
pub const BACKUP_PREFIX: &str = "OLD_";

/// Bounded retry used for every download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub attempts: u32,
    /// Pause before every attempt after the first.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Root configuration structure. Built once and borrowed by the fetcher
/// and the launch loop.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// The bot jar.
    pub artifact_path: PathBuf,

    /// Previous jar, kept while an update is in flight.
    pub backup_path: PathBuf,

    /// Stable build download URL.
    pub recommended_url: String,

    /// Beta build download URL.
    pub latest_url: String,

    /// Command line preceding the artifact path.
    pub command: Vec<String>,

    /// Directory the child is started in.
    pub working_dir: PathBuf,

    /// Environment variable that carries `version` to the child.
    pub version_env: String,

    /// Launcher version reported to the child.
    pub version: String,

    pub retry: RetryPolicy,

    /// Upper bound on a single download request, body included.
    pub download_timeout: Duration,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        let artifact_path = PathBuf::from("./Yui.jar");
        Self {
            backup_path: backup_path_for(&artifact_path),
            artifact_path,
            recommended_url:
                "https://drone.io/github.com/DV8FromTheWorld/Yui/files/release/Yui-Recommended.jar"
                    .into(),
            latest_url: "https://drone.io/github.com/DV8FromTheWorld/Yui/files/release/Yui-Latest.jar"
                .into(),
            command: vec!["java".into(), "-Dfile.encoding=UTF-8".into(), "-jar".into()],
            working_dir: PathBuf::from("."),
            version_env: "BootstrapVersion".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            retry: RetryPolicy::default(),
            download_timeout: Duration::from_secs(300),
        }
    }
}

impl BootstrapConfig {
    /// Defaults, with the artifact and backup resolved inside `dir`.
    ///
    /// The child runs with `dir` as its current directory while the jar is
    /// passed as `dir/Yui.jar`, so `dir` must be absolute (see
    /// [`crate::config::load_config`]).
    pub fn rooted_at(dir: &Path) -> Self {
        let defaults = Self::default();
        let artifact_path = dir.join(
            defaults
                .artifact_path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| defaults.artifact_path.clone()),
        );
        Self {
            backup_path: backup_path_for(&artifact_path),
            artifact_path,
            working_dir: dir.to_path_buf(),
            ..defaults
        }
    }

    /// Download URL for a release channel.
    pub fn url_for(&self, channel: Channel) -> &str {
        match channel {
            Channel::Recommended => &self.recommended_url,
            Channel::Latest => &self.latest_url,
        }
    }
}

/// `dir/Yui.jar` -> `dir/OLD_Yui.jar`.
pub fn backup_path_for(artifact: &Path) -> PathBuf {
    let name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    artifact.with_file_name(format!("{BACKUP_PREFIX}{name}"))
}
