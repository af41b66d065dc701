//! Status-bar item with the Settings and Quit menu.
use std::thread;

use egui::Context;
use tokio::sync::mpsc as tokio_mpsc;
use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{
        Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem,
        accelerator::{Accelerator, Code, Modifiers},
    },
};

use h9::controller::MenuCommand;

use crate::app::AppEvent;

/// Template icon; macOS tints it for light and dark menu bars.
static TRAY_ICON_PNG: &[u8] =
    include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/tray-icon.png"));

/// Decode the embedded icon.
fn tray_icon_image() -> Option<Icon> {
    match image::load_from_memory(TRAY_ICON_PNG) {
        Ok(im) => {
            let rgba = im.to_rgba8();
            let (w, h) = rgba.dimensions();
            Icon::from_rgba(rgba.to_vec(), w, h).ok()
        }
        Err(e) => {
            tracing::warn!("failed to decode tray icon: {}", e);
            None
        }
    }
}

/// Build the status-bar item and start forwarding its menu activations.
///
/// Returns `None` if the status item could not be created; the app keeps
/// running without it.
pub fn build_tray_and_listeners(
    tx: tokio_mpsc::UnboundedSender<AppEvent>,
    egui_ctx: Context,
) -> Option<TrayIcon> {
    let menu = Menu::new();
    let settings = MenuItem::new(
        "Settings",
        true,
        Some(Accelerator::new(Some(Modifiers::SUPER), Code::KeyS)),
    );
    let quit = MenuItem::new(
        "Quit",
        true,
        Some(Accelerator::new(Some(Modifiers::SUPER), Code::KeyQ)),
    );
    if let Err(e) = menu.append_items(&[&settings, &PredefinedMenuItem::separator(), &quit]) {
        tracing::error!("failed to build tray menu: {}", e);
        return None;
    }
    let commands: Vec<(MenuId, MenuCommand)> = vec![
        (settings.id().clone(), MenuCommand::Settings),
        (quit.id().clone(), MenuCommand::Quit),
    ];

    let mut builder = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_menu_on_left_click(true)
        .with_tooltip("H9");
    if let Some(icon) = tray_icon_image() {
        builder = builder.with_icon(icon).with_icon_as_template(true);
    }
    let tray = match builder.build() {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to create tray icon: {}", e);
            return None;
        }
    };

    thread::spawn(move || {
        let menu_rx = MenuEvent::receiver();
        while let Ok(ev) = menu_rx.recv() {
            let Some((_, cmd)) = commands.iter().find(|(id, _)| *id == ev.id) else {
                continue;
            };
            if tx.send(AppEvent::Menu(*cmd)).is_err() {
                break;
            }
            egui_ctx.request_repaint();
        }
    });

    Some(tray)
}
