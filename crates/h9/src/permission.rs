//! Accessibility permission probing and the snapshot the UI renders from.
use tracing::info;

/// Source of the current Accessibility grant.
pub trait PermissionProbe {
    /// Return whether the process is currently trusted for Accessibility.
    fn check(&self) -> bool;
}

/// Probe used once at startup. When the permission is missing macOS shows
/// its own prompt; the result reflects the state before the user answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptingProbe;

impl PermissionProbe for PromptingProbe {
    fn check(&self) -> bool {
        ::permissions::accessibility_ok_with_prompt()
    }
}

/// Probe that never prompts. Used to refresh the snapshot while running.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProbe;

impl PermissionProbe for SilentProbe {
    fn check(&self) -> bool {
        ::permissions::accessibility_ok()
    }
}

/// Snapshot of the Accessibility grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionState {
    /// Whether Accessibility permission is granted.
    granted: bool,
}

impl PermissionState {
    /// Query `probe` once and record the answer.
    pub fn snapshot(probe: &dyn PermissionProbe) -> Self {
        Self {
            granted: probe.check(),
        }
    }

    /// Whether the permission was granted when last probed.
    pub fn granted(&self) -> bool {
        self.granted
    }

    /// Re-query `probe`. Returns `true` if the grant changed.
    pub fn refresh(&mut self, probe: &dyn PermissionProbe) -> bool {
        let now = probe.check();
        if now == self.granted {
            return false;
        }
        info!(granted = now, "accessibility permission changed");
        self.granted = now;
        true
    }
}
