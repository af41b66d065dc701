//! Opening System Settings panes.
use std::{io, process::Command};

use crate::{Error, Result};

/// Deep link to System Settings → Privacy & Security → Accessibility.
pub const ACCESSIBILITY_PANE_URL: &str =
    "x-apple.systempreferences:com.apple.preference.security?Privacy_Accessibility";

/// Hands URLs to the OS.
pub trait Launcher {
    /// Ask the OS to open `url` with its registered handler.
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Launcher backed by the macOS `open` command.
///
/// `open` hands the URL to LaunchServices and exits, so the child is waited
/// on rather than left behind.
#[derive(Debug, Clone, Copy)]
pub struct SystemLauncher {
    /// Program that receives the URL as its only argument.
    program: &'static str,
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self { program: "open" }
    }
}

impl SystemLauncher {
    /// Launch URLs through `program` instead of `open`.
    pub fn with_program(program: &'static str) -> Self {
        Self { program }
    }
}

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        let launch_err = |source| Error::Launch {
            url: url.to_string(),
            source,
        };
        let status = Command::new(self.program)
            .arg(url)
            .status()
            .map_err(launch_err)?;
        if status.success() {
            Ok(())
        } else {
            Err(launch_err(io::Error::other(format!(
                "{} exited with {status}",
                self.program
            ))))
        }
    }
}

/// Open the Accessibility privacy pane. Failure is logged and otherwise ignored.
pub fn open_accessibility_settings(launcher: &dyn Launcher) {
    if let Err(e) = launcher.open_url(ACCESSIBILITY_PANE_URL) {
        tracing::warn!("failed to open Accessibility settings: {}", e);
    }
}
