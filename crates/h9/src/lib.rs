//! H9: a macOS menu-bar shell for window placement shortcuts.
//!
//! The crate is the UI half of the app: a status-bar controller, a host that
//! owns at most one secondary window, the settings panel with the fixed
//! shortcut map, and the Accessibility permission snapshot it renders from.
//! The binary in `main.rs` wires these into an eframe event loop and a
//! `tray-icon` status item.

/// Menu commands and the state they act on.
pub mod controller;
mod error;
/// Single-window ownership.
pub mod host;
/// System Settings deep links.
pub mod launcher;
#[cfg(target_os = "macos")]
mod nswindow;
pub mod permission;
pub mod prefs;
pub mod settings;
pub mod shortcuts;
/// egui-backed windows.
pub mod viewport;

pub use error::{Error, Result};

#[cfg(target_os = "macos")]
pub use nswindow::make_accessory;
