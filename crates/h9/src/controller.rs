//! Menu-bar command handling.
//!
//! [`MenuBarController`] owns everything the two menu items act on: the
//! permission snapshot, the window host, the live settings panel and the
//! launcher used to reach System Settings.
use egui::{CentralPanel, Context};
use tracing::{debug, info, warn};

use crate::{
    host::{Shown, WindowBackend, WindowHost, WindowKind, WindowSpec},
    launcher::{self, Launcher},
    permission::{PermissionProbe, PermissionState, SilentProbe},
    prefs::{Preferences, SavedShortcut},
    settings::{PanelAction, SETTINGS_SIZE, SettingsPanel},
    viewport::ViewportBackend,
};

/// Items in the status-bar menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Show the settings window.
    Settings,
    /// Terminate the app.
    Quit,
}

/// Whether the app keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Exit now.
    Exit,
}

/// Owner of the app's state and the handler for menu commands.
pub struct MenuBarController<B, L>
where
    B: WindowBackend,
{
    /// Accessibility snapshot taken at startup.
    permission: PermissionState,
    /// Probe used to refresh the snapshot when settings regains focus.
    refresh_probe: Box<dyn PermissionProbe>,
    /// The single secondary window.
    host: WindowHost<B>,
    /// Panel state for the settings window while it exists.
    panel: Option<SettingsPanel>,
    /// Opens System Settings.
    launcher: L,
    /// Preference store.
    prefs: Box<dyn Preferences>,
}

impl<B, L> MenuBarController<B, L>
where
    B: WindowBackend,
    L: Launcher,
{
    /// Build the controller. `startup_probe` is queried exactly once, here.
    pub fn new(
        startup_probe: &dyn PermissionProbe,
        backend: B,
        launcher: L,
        prefs: Box<dyn Preferences>,
    ) -> Self {
        let permission = PermissionState::snapshot(startup_probe);
        info!(granted = permission.granted(), "accessibility at startup");
        Self {
            permission,
            refresh_probe: Box::new(SilentProbe),
            host: WindowHost::new(backend),
            panel: None,
            launcher,
            prefs,
        }
    }

    /// Replace the probe used for focus-time refreshes.
    pub fn with_refresh_probe(mut self, probe: Box<dyn PermissionProbe>) -> Self {
        self.refresh_probe = probe;
        self
    }

    /// Handle a menu command.
    pub fn handle(&mut self, cmd: MenuCommand) -> Flow {
        debug!(?cmd, "menu command");
        match cmd {
            MenuCommand::Settings => {
                self.open_settings();
                Flow::Continue
            }
            MenuCommand::Quit => {
                self.host.close();
                self.panel = None;
                Flow::Exit
            }
        }
    }

    /// Show the settings window, building a fresh panel unless the window
    /// was already open.
    pub fn open_settings(&mut self) {
        let (w, h) = SETTINGS_SIZE;
        match self.host.show(&WindowSpec::new(WindowKind::Settings, w, h)) {
            Ok(Shown::Refocused) if self.panel.is_some() => {}
            Ok(_) => {
                let saved = SavedShortcut::load(self.prefs.as_ref());
                self.panel = Some(SettingsPanel::new(saved));
            }
            Err(e) => {
                warn!("settings window not shown: {}", e);
                self.panel = None;
            }
        }
    }

    /// Carry out an action requested by the panel.
    pub fn apply(&mut self, action: PanelAction) {
        match action {
            PanelAction::OpenAccessibilitySettings => {
                launcher::open_accessibility_settings(&self.launcher);
            }
        }
    }

    /// Re-probe the permission. Returns `true` if it changed.
    pub fn refresh_permission(&mut self) -> bool {
        self.permission.refresh(self.refresh_probe.as_ref())
    }

    /// Whether Accessibility was granted at the last probe.
    pub fn granted(&self) -> bool {
        self.permission.granted()
    }

    /// The settings panel if its window is still open. A panel whose window
    /// was closed is dropped here.
    pub fn live_panel(&mut self) -> Option<&mut SettingsPanel> {
        if self.host.current().is_none() {
            self.panel = None;
        }
        self.panel.as_mut()
    }

    /// The window host.
    pub fn host(&mut self) -> &mut WindowHost<B> {
        &mut self.host
    }

    /// The launcher.
    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

impl<L: Launcher> MenuBarController<ViewportBackend, L> {
    /// Render the secondary window, if any, and act on what happened in it.
    pub fn render(&mut self, ctx: &Context) {
        let Some((kind, handle)) = self.host.current() else {
            return;
        };
        let granted = self.permission.granted();
        let panel = &mut self.panel;
        let mut action = None;
        let events = self.host.backend_mut().show(ctx, handle, |ui| match kind {
            WindowKind::Settings => {
                if let Some(p) = panel.as_mut() {
                    CentralPanel::default().show_inside(ui, |ui| {
                        if let Some(a) = p.ui(ui, granted) {
                            action = Some(a);
                        }
                    });
                }
            }
        });

        if events.focus_gained && self.refresh_permission() {
            ctx.request_repaint();
        }
        if let Some(a) = action {
            self.apply(a);
        }
        if events.closed {
            self.panel = None;
        }
    }
}
