//! Binary entrypoint for the H9 menu-bar app.

#[cfg(target_os = "macos")]
mod app;
#[cfg(target_os = "macos")]
mod tray;

#[cfg(target_os = "macos")]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "h9", about = "Menu-bar window placement utility", version)]
    /// Command-line interface for the `h9` binary.
    pub struct Cli {
        /// Logging controls
        #[command(flatten)]
        pub log: logging::LogArgs,

        /// Keep preferences in this TOML file instead of the user defaults
        #[arg(long, value_name = "PATH")]
        pub prefs: Option<PathBuf>,
    }
}

#[cfg(target_os = "macos")]
fn main() -> eframe::Result<()> {
    use clap::Parser;
    use eframe::NativeOptions;
    use h9::{
        controller::MenuBarController,
        launcher::SystemLauncher,
        permission::PromptingProbe,
        prefs::{self, MemoryPrefs, Preferences},
        viewport::ViewportBackend,
    };
    use tokio::sync::mpsc as tokio_mpsc;
    use tracing::{error, warn};

    use crate::app::{AppEvent, H9App};

    let cli = cli::Cli::parse();

    if let Err(e) = logging::init(&cli.log) {
        eprintln!("h9: logging not initialized: {e}");
    }

    let store: Box<dyn Preferences> = match prefs::open_store(cli.prefs.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            Box::new(MemoryPrefs::default())
        }
    };
    let controller = MenuBarController::new(
        &PromptingProbe,
        ViewportBackend::new(),
        SystemLauncher::default(),
        store,
    );

    // `App::ui` only runs while the root is visible, so the root is a 1×1
    // transparent click-through window instead of a hidden one.
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1.0, 1.0])
            .with_decorations(false)
            .with_transparent(true)
            .with_mouse_passthrough(true)
            .with_taskbar(false)
            .with_active(false),
        ..Default::default()
    };

    let (tx, rx) = tokio_mpsc::unbounded_channel::<AppEvent>();

    eframe::run_native(
        "h9",
        options,
        Box::new(move |cc| {
            if let Err(e) = h9::make_accessory() {
                warn!("{}", e);
            }
            let tray = tray::build_tray_and_listeners(tx, cc.egui_ctx.clone());
            Ok(Box::new(H9App::new(rx, tray, controller)))
        }),
    )
}

#[cfg(not(target_os = "macos"))]
fn main() {
    eprintln!("h9 is a macOS menu-bar app and does not run on this platform");
    std::process::exit(1);
}
