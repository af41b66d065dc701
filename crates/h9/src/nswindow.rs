//! AppKit tweaks for egui-created windows.
//!
//! egui does not expose every NSWindow behavior, so a few operations find the
//! window by its title and call AppKit directly. All of them require the main
//! thread.
use objc2::rc::autoreleasepool;
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy, NSWindow};
use objc2_foundation::MainThreadMarker;

use crate::{Error, Result};

/// Return true if the window title matches the provided string.
fn window_title_matches(window: &NSWindow, title_match: &str) -> bool {
    let title = window.title();
    autoreleasepool(|pool| unsafe { title.to_str(pool) == title_match })
}

/// Center the window titled `title_match` on its screen.
///
/// Returns `Ok(false)` if no such window exists yet.
pub fn center(title_match: &str) -> Result<bool> {
    let Some(mtm) = MainThreadMarker::new() else {
        return Err(Error::MainThread);
    };
    let app = NSApplication::sharedApplication(mtm);
    for w in app.windows().iter() {
        if window_title_matches(&w, title_match) {
            w.center();
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run as a menu-bar accessory: no Dock icon, no app menu.
pub fn make_accessory() -> Result<()> {
    let Some(mtm) = MainThreadMarker::new() else {
        return Err(Error::MainThread);
    };
    NSApplication::sharedApplication(mtm)
        .setActivationPolicy(NSApplicationActivationPolicy::Accessory);
    Ok(())
}
