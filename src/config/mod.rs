pub mod schema;

pub use schema::{backup_path_for, BootstrapConfig, RetryPolicy};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Config for a launcher running in `dir`.
///
/// `~` is expanded, the directory is created if missing, and the result is
/// canonicalized so the jar path stays valid from inside the child's
/// working directory.
pub fn load_config(dir: &str) -> Result<BootstrapConfig> {
    let path = PathBuf::from(shellexpand::tilde(dir).into_owned());
    if !path.exists() {
        std::fs::create_dir_all(&path).with_context(|| {
            format!("Failed to create working directory: {}", path.display())
        })?;
    }
    let path = std::fs::canonicalize(&path)
        .with_context(|| format!("Failed to resolve working directory: {}", path.display()))?;

    Ok(BootstrapConfig::rooted_at(&path))
}
