//! The launch loop and the process seam it drives.

pub mod launcher;
pub mod loop_;

pub use launcher::{LaunchSpec, Launcher, ProcessLauncher};
pub use loop_::{Next, Supervisor};
