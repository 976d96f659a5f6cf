//! Exit-code protocol shared between the launcher and the bot it supervises.
//!
//! The child's exit code is the only channel it has to talk back to us, so
//! the integer values here are fixed and must match what the bot sends.

use std::fmt;

// ---------------------------------------------------------------------------
// Child -> launcher exit codes
// ---------------------------------------------------------------------------

/// The bot asked to shut down and not be relaunched.
pub const NORMAL_SHUTDOWN: i32 = 10;
/// The bot asked to be restarted as-is.
pub const RESTART_EXITCODE: i32 = 11;
/// The bot wrote a fresh config and needs the operator to fill it in.
pub const NEWLY_CREATED_CONFIG: i32 = 12;

/// Update to the latest (beta) build, then relaunch.
pub const UPDATE_LATEST_EXITCODE: i32 = 20;
/// Update to the recommended (stable) build, then relaunch.
pub const UPDATE_RECOMMENDED_EXITCODE: i32 = 21;

pub const UNABLE_TO_CONNECT: i32 = 30;
pub const BAD_CREDENTIALS: i32 = 31;
pub const NO_CREDENTIALS: i32 = 32;

// ---------------------------------------------------------------------------
// Launcher-only exit statuses (never sent by the child)
// ---------------------------------------------------------------------------

pub const UNKNOWN_EXITCODE: i32 = 50;
pub const DOWNLOAD_FAILED: i32 = 51;
pub const UPDATE_FAILED: i32 = 52;

// ---------------------------------------------------------------------------
// Release channels
// ---------------------------------------------------------------------------

/// Release track to download the artifact from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Stable builds.
    Recommended,
    /// Beta builds.
    Latest,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recommended => write!(f, "recommended"),
            Self::Latest => write!(f, "latest"),
        }
    }
}

// ---------------------------------------------------------------------------
// Child exit interpretation
// ---------------------------------------------------------------------------

/// What a child exit means to the launch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    NormalShutdown,
    Restart,
    Update(Channel),
    NewlyCreatedConfig,
    UnableToConnect,
    BadCredentials,
    NoCredentials,
    /// Anything outside the protocol. `None` means the child had no exit
    /// code at all (killed by a signal).
    Unrecognized(Option<i32>),
}

impl ChildExit {
    /// Classify a raw exit code as reported by the OS.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(NORMAL_SHUTDOWN) => Self::NormalShutdown,
            Some(RESTART_EXITCODE) => Self::Restart,
            Some(NEWLY_CREATED_CONFIG) => Self::NewlyCreatedConfig,
            Some(UPDATE_LATEST_EXITCODE) => Self::Update(Channel::Latest),
            Some(UPDATE_RECOMMENDED_EXITCODE) => Self::Update(Channel::Recommended),
            Some(UNABLE_TO_CONNECT) => Self::UnableToConnect,
            Some(BAD_CREDENTIALS) => Self::BadCredentials,
            Some(NO_CREDENTIALS) => Self::NoCredentials,
            other => Self::Unrecognized(other),
        }
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NormalShutdown => write!(f, "normal shutdown"),
            Self::Restart => write!(f, "restart requested"),
            Self::Update(channel) => write!(f, "update requested ({channel})"),
            Self::NewlyCreatedConfig => write!(f, "newly created config"),
            Self::UnableToConnect => write!(f, "unable to connect"),
            Self::BadCredentials => write!(f, "bad credentials"),
            Self::NoCredentials => write!(f, "missing credentials"),
            Self::Unrecognized(Some(code)) => write!(f, "unrecognized exit code {code}"),
            Self::Unrecognized(None) => write!(f, "terminated without an exit code"),
        }
    }
}

// ---------------------------------------------------------------------------
// Update outcome
// ---------------------------------------------------------------------------

/// Result of an update attempt, handed to the next launch of the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOutcome {
    #[default]
    None,
    Successful,
    Failed,
}

impl UpdateOutcome {
    /// Token appended to the child's command line, if any.
    pub fn as_arg(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Successful => Some("successful"),
            Self::Failed => Some("failed"),
        }
    }
}

impl From<bool> for UpdateOutcome {
    fn from(succeeded: bool) -> Self {
        if succeeded {
            Self::Successful
        } else {
            Self::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_codes_select_channel() {
        assert_eq!(
            ChildExit::from_code(Some(20)),
            ChildExit::Update(Channel::Latest)
        );
        assert_eq!(
            ChildExit::from_code(Some(21)),
            ChildExit::Update(Channel::Recommended)
        );
    }

    #[test]
    fn launcher_statuses_are_not_child_codes() {
        for code in [UNKNOWN_EXITCODE, DOWNLOAD_FAILED, UPDATE_FAILED, 0, 1, 99] {
            assert_eq!(
                ChildExit::from_code(Some(code)),
                ChildExit::Unrecognized(Some(code))
            );
        }
        assert_eq!(ChildExit::from_code(None), ChildExit::Unrecognized(None));
    }

    #[test]
    fn outcome_tokens() {
        assert_eq!(UpdateOutcome::None.as_arg(), None);
        assert_eq!(UpdateOutcome::from(true).as_arg(), Some("successful"));
        assert_eq!(UpdateOutcome::from(false).as_arg(), Some("failed"));
    }
}
