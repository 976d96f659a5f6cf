//! Child process launching.

use crate::config::BootstrapConfig;
use crate::error::LaunchError;
use crate::types::UpdateOutcome;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tracing::debug;

/// Everything needed to start one instance of the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub current_dir: PathBuf,
}

impl LaunchSpec {
    /// Command prefix + jar path, plus the outcome token when an update was
    /// just attempted.
    pub fn build(config: &BootstrapConfig, outcome: UpdateOutcome) -> Result<Self, LaunchError> {
        let (program, prefix) = config
            .command
            .split_first()
            .ok_or(LaunchError::EmptyCommand)?;

        let mut args = prefix.to_vec();
        args.push(config.artifact_path.to_string_lossy().into_owned());
        if let Some(token) = outcome.as_arg() {
            args.push(token.to_string());
        }

        Ok(Self {
            program: program.clone(),
            args,
            env: vec![(config.version_env.clone(), config.version.clone())],
            current_dir: config.working_dir.clone(),
        })
    }
}

/// Runs a child to completion and reports its exit code.
#[async_trait]
pub trait Launcher: Send {
    /// Start the child, wait for it to exit, and return its exit code
    /// (`None` if it was killed by a signal).
    async fn run(&mut self, spec: &LaunchSpec) -> Result<Option<i32>, LaunchError>;
}

/// Launches real OS processes with the console inherited.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn run(&mut self, spec: &LaunchSpec) -> Result<Option<i32>, LaunchError> {
        debug!("Launching {} {:?}", spec.program, spec.args);

        let mut child = tokio::process::Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k, v)))
            .current_dir(&spec.current_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: spec.program.clone(),
                source,
            })?;

        let status = child.wait().await.map_err(|source| LaunchError::Wait {
            program: spec.program.clone(),
            source,
        })?;

        debug!("{} exited: {}", spec.program, status);
        Ok(status.code())
    }
}
