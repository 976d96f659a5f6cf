//! Real child processes: `sh` stands in for the JVM and the "jar" is a script.
#![cfg(unix)]

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use yui_bootstrap::config::{self, BootstrapConfig, RetryPolicy};
use yui_bootstrap::error::FetchError;
use yui_bootstrap::fetch::Downloader;
use yui_bootstrap::supervisor::{LaunchSpec, Launcher, ProcessLauncher, Supervisor};
use yui_bootstrap::types::UpdateOutcome;

/// Serves a fixed script as the "new build".
struct ServeScript(&'static str);

#[async_trait]
impl Downloader for ServeScript {
    async fn download(&self, _url: &str, dest: &Path) -> Result<(), FetchError> {
        std::fs::write(dest, self.0).map_err(|_| FetchError::Missing(dest.to_path_buf()))
    }
}

fn sh_config(dir: &Path) -> BootstrapConfig {
    BootstrapConfig {
        command: vec!["sh".into()],
        retry: RetryPolicy {
            attempts: 1,
            delay: Duration::ZERO,
        },
        ..BootstrapConfig::rooted_at(dir)
    }
}

fn read_log(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("launches.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn child_sees_version_env_and_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = sh_config(dir.path());
    std::fs::write(
        &cfg.artifact_path,
        "echo \"$BootstrapVersion\" >> launches.log\nexit 31\n",
    )
    .unwrap();

    let mut launcher = ProcessLauncher;
    let spec = LaunchSpec::build(&cfg, UpdateOutcome::None).unwrap();
    let code = launcher.run(&spec).await.unwrap();

    assert_eq!(code, Some(31));
    assert_eq!(read_log(dir.path()), vec![env!("CARGO_PKG_VERSION").to_string()]);
}

#[tokio::test]
async fn restart_loop_with_real_children() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = sh_config(dir.path());
    std::fs::write(
        &cfg.artifact_path,
        "echo run >> launches.log\n\
         n=$(wc -l < launches.log | tr -d ' ')\n\
         if [ \"$n\" -lt 3 ]; then exit 11; fi\n\
         exit 10\n",
    )
    .unwrap();

    let status = Supervisor::new(&cfg, ServeScript(""), ProcessLauncher)
        .run()
        .await;

    assert_eq!(status, 0);
    assert_eq!(read_log(dir.path()).len(), 3);
}

#[tokio::test]
async fn update_hands_outcome_to_new_build() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = sh_config(dir.path());
    std::fs::write(&cfg.artifact_path, "echo old >> launches.log\nexit 20\n").unwrap();

    let new_build = ServeScript("echo \"new $1\" >> launches.log\nexit 10\n");
    let status = Supervisor::new(&cfg, new_build, ProcessLauncher).run().await;

    assert_eq!(status, 0);
    assert_eq!(read_log(dir.path()), vec!["old", "new successful"]);
    assert!(cfg.backup_path.exists());
}

#[tokio::test]
async fn unstartable_program_exits_50() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = BootstrapConfig {
        command: vec!["/nonexistent/yui-runtime".into()],
        ..sh_config(dir.path())
    };
    std::fs::write(&cfg.artifact_path, "exit 10\n").unwrap();

    let status = Supervisor::new(&cfg, ServeScript(""), ProcessLauncher)
        .run()
        .await;

    assert_eq!(status, 50);
}

#[tokio::test]
async fn relative_dir_still_finds_the_jar() {
    let dir = tempfile::tempdir_in(".").unwrap();
    let relative = dir.path().file_name().unwrap().to_string_lossy().into_owned();

    let cfg = BootstrapConfig {
        command: vec!["sh".into()],
        ..config::load_config(&relative).unwrap()
    };
    std::fs::write(&cfg.artifact_path, "exit 10\n").unwrap();

    let spec = LaunchSpec::build(&cfg, UpdateOutcome::None).unwrap();
    let code = ProcessLauncher.run(&spec).await.unwrap();

    assert_eq!(code, Some(10));
}
