//! eframe application: drains tray events and renders the secondary window.
use eframe::{App, Frame};
use egui::{Context, Ui, ViewportCommand};
use tokio::sync::mpsc as tokio_mpsc;
use tray_icon::TrayIcon;

use h9::{
    controller::{Flow, MenuBarController, MenuCommand},
    launcher::SystemLauncher,
    viewport::ViewportBackend,
};

/// Events delivered to the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A status-bar menu item was chosen.
    Menu(MenuCommand),
}

/// Root eframe app. The root viewport stays hidden.
pub struct H9App {
    /// Events from the tray listener thread.
    rx: tokio_mpsc::UnboundedReceiver<AppEvent>,
    /// Status item; dropped on quit.
    tray: Option<TrayIcon>,
    /// Menu handling and window state.
    controller: MenuBarController<ViewportBackend, SystemLauncher>,
    /// Set once Quit was chosen so the root close is let through.
    exiting: bool,
}

impl H9App {
    pub fn new(
        rx: tokio_mpsc::UnboundedReceiver<AppEvent>,
        tray: Option<TrayIcon>,
        controller: MenuBarController<ViewportBackend, SystemLauncher>,
    ) -> Self {
        Self {
            rx,
            tray,
            controller,
            exiting: false,
        }
    }

    /// Drop the status item and close the root viewport, which ends the
    /// event loop.
    fn quit(&mut self, ctx: &Context) {
        tracing::info!("quitting");
        self.exiting = true;
        self.tray = None;
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }
}

impl App for H9App {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Color32::TRANSPARENT.to_normalized_gamma_f32()
    }

    fn logic(&mut self, ctx: &Context, _frame: &mut Frame) {
        // The root viewport is only a host; never let it close on its own.
        if !self.exiting && ctx.input(|i| i.viewport().close_requested()) {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
        }

        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                AppEvent::Menu(cmd) => {
                    if self.controller.handle(cmd) == Flow::Exit {
                        self.quit(ctx);
                        return;
                    }
                    ctx.request_repaint();
                }
            }
        }
    }

    fn ui(&mut self, ui: &mut Ui, _frame: &mut Frame) {
        if !self.exiting {
            self.controller.render(ui.ctx());
        }
    }
}
