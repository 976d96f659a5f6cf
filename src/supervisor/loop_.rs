//! Launch loop: Launch → Wait → React.
//!
//! The launcher:
//! 1. Makes sure the bot jar exists (downloading the recommended build if not)
//! 2. Starts the bot with the console inherited
//! 3. Waits for it to exit
//! 4. Restarts, updates-then-restarts, or exits based on the exit code
//! 5. Repeats

use crate::config::BootstrapConfig;
use crate::fetch::{Downloader, Fetcher, UpdateResult};
use crate::supervisor::launcher::{LaunchSpec, Launcher};
use crate::types::*;
use colored::Colorize;
use tracing::{error, info, warn};

/// What the loop does after reacting to a child exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next {
    /// Launch the bot again, passing along the outcome of any update.
    Launch(UpdateOutcome),
    /// Stop the launcher with this process status.
    Exit(i32),
}

/// Owns the launch loop. One child at a time, one control thread.
pub struct Supervisor<'a, D, L> {
    config: &'a BootstrapConfig,
    fetcher: Fetcher<'a, D>,
    launcher: L,
}

impl<'a, D: Downloader, L: Launcher> Supervisor<'a, D, L> {
    pub fn new(config: &'a BootstrapConfig, downloader: D, launcher: L) -> Self {
        Self {
            config,
            fetcher: Fetcher::new(config, downloader),
            launcher,
        }
    }

    /// Run until the bot asks us to stop or something unrecoverable happens.
    /// Returns the status the launcher process should exit with.
    pub async fn run(&mut self) -> i32 {
        if !self.config.artifact_path.exists() {
            info!(
                "{} not found, downloading the recommended build",
                self.config.artifact_path.display()
            );
            if !self.fetcher.download(Channel::Recommended).await {
                println!(
                    "{}",
                    "Could not download the Bot. Check Internet Connection and File System.".red()
                );
                return DOWNLOAD_FAILED;
            }
        }

        println!("{} Starting the Bootstrap launch loop", ">>>".green().bold());

        let mut outcome = UpdateOutcome::None;
        loop {
            let exit = match self.launch(outcome).await {
                Ok(exit) => exit,
                Err(status) => return status,
            };

            match self.react(exit).await {
                Next::Launch(next) => outcome = next,
                Next::Exit(status) => return status,
            }
        }
    }

    /// Start one child and wait for it. A launch failure ends the loop.
    async fn launch(&mut self, outcome: UpdateOutcome) -> Result<ChildExit, i32> {
        let spec = LaunchSpec::build(self.config, outcome).map_err(|e| {
            println!("{} Could not build the Bot command: {}", "Error:".red().bold(), e);
            UNKNOWN_EXITCODE
        })?;

        match self.launcher.run(&spec).await {
            Ok(code) => {
                let exit = ChildExit::from_code(code);
                info!("Bot exited: {}", exit);
                Ok(exit)
            }
            Err(e) => {
                println!("{} Could not launch the Bot: {}", "Error:".red().bold(), e);
                error!("Launch failed: {}", e);
                Err(UNKNOWN_EXITCODE)
            }
        }
    }

    /// Decide what happens after the bot exited with `exit`.
    ///
    /// Update requests run the fetcher here; every other arm is a pure
    /// mapping from exit category to next step.
    pub async fn react(&self, exit: ChildExit) -> Next {
        match exit {
            ChildExit::NormalShutdown => {
                println!("The Bot requested to shutdown and not relaunch.\nShutting down...");
                Next::Exit(0)
            }
            ChildExit::Restart => {
                println!("Bot stopped due to restart request. Restarting...");
                Next::Launch(UpdateOutcome::None)
            }
            ChildExit::Update(channel) => {
                println!("Bot requested an update to the {} build.", channel);
                match self.fetcher.update(channel).await {
                    UpdateResult::Updated => Next::Launch(UpdateOutcome::Successful),
                    UpdateResult::Failed => Next::Launch(UpdateOutcome::Failed),
                    UpdateResult::Unlaunchable => {
                        println!(
                            "{}",
                            "The update failed and no Bot jar could be restored. Shutting down."
                                .red()
                        );
                        Next::Exit(UPDATE_FAILED)
                    }
                }
            }
            ChildExit::NewlyCreatedConfig => {
                println!(
                    "The config was created for the first time. Please input Email and Password values."
                );
                Next::Exit(NEWLY_CREATED_CONFIG)
            }
            ChildExit::UnableToConnect => {
                println!("The Bot could not connect. Shutting down.");
                Next::Exit(UNABLE_TO_CONNECT)
            }
            ChildExit::BadCredentials => {
                println!("The Bot was given bad credentials. Shutting down.");
                Next::Exit(BAD_CREDENTIALS)
            }
            ChildExit::NoCredentials => {
                println!("The Bot has no credentials configured. Shutting down.");
                Next::Exit(NO_CREDENTIALS)
            }
            ChildExit::Unrecognized(code) => {
                let raw = code.map_or_else(|| "none".to_string(), |c| c.to_string());
                println!(
                    "{} The Bot's exit code was unrecognized. ExitCode: {}",
                    "Warning:".yellow().bold(),
                    raw
                );
                println!("Shutting down now.");
                warn!("Unrecognized child exit: {}", exit);
                Next::Exit(UNKNOWN_EXITCODE)
            }
        }
    }
}
