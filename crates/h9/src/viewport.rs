//! Window backend built on egui immediate viewports.
//!
//! Every created window gets a fresh [`ViewportId`], so a window recreated
//! after the user closed it is a brand new OS window rather than a revived
//! one. A viewport lives for as long as [`ViewportBackend::show`] is called
//! for it each frame; dropping it from the map closes the OS window.
use std::collections::HashMap;

use egui::{Context, Ui, ViewportBuilder, ViewportCommand, ViewportId, WindowLevel, vec2};
use tracing::debug;

use crate::{
    Result,
    host::{WindowBackend, WindowSpec},
};

/// Per-window bookkeeping.
#[derive(Debug)]
struct Managed {
    /// What the window was created for.
    spec: WindowSpec,
    /// Send a focus command on the next frame.
    want_focus: bool,
    /// Center the window once the OS window exists.
    want_center: bool,
    /// Focus state reported on the previous frame.
    focused: Option<bool>,
}

/// Things that happened to a window while it was rendered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameEvents {
    /// The window became the key window this frame.
    pub focus_gained: bool,
    /// The user closed the window; it is gone after this frame.
    pub closed: bool,
}

/// [`WindowBackend`] over egui viewports.
#[derive(Debug, Default)]
pub struct ViewportBackend {
    /// Incremented for every created window.
    generation: u64,
    /// Open windows.
    windows: HashMap<ViewportId, Managed>,
}

impl ViewportBackend {
    /// Construct a backend with no windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `handle` for this frame with `add_contents` drawing its content.
    ///
    /// Unknown handles render nothing. When the context embeds viewports the
    /// window is drawn as an egui window inside the parent.
    pub fn show(
        &mut self,
        ctx: &Context,
        handle: ViewportId,
        mut add_contents: impl FnMut(&mut Ui),
    ) -> FrameEvents {
        let Some(win) = self.windows.get_mut(&handle) else {
            return FrameEvents::default();
        };
        let mut events = FrameEvents::default();
        ctx.show_viewport_immediate(handle, builder(&win.spec), |wctx, _| {
            if wctx.input(|i| i.viewport().close_requested()) {
                events.closed = true;
                return;
            }
            if win.want_center && center(wctx.ctx(), &win.spec) {
                win.want_center = false;
            }
            if win.want_focus {
                wctx.send_viewport_cmd(ViewportCommand::Focus);
                win.want_focus = false;
            }
            let focused = wctx.input(|i| i.viewport().focused);
            events.focus_gained = focused == Some(true) && win.focused != Some(true);
            win.focused = focused;
            add_contents(wctx);
        });
        if events.closed {
            debug!(kind = %win.spec.kind, ?handle, "window closed by user");
            self.windows.remove(&handle);
        }
        events
    }
}

impl WindowBackend for ViewportBackend {
    type Handle = ViewportId;

    fn create(&mut self, spec: &WindowSpec) -> Result<ViewportId> {
        self.generation += 1;
        let id = ViewportId::from_hash_of(("h9", spec.kind.title(), self.generation));
        self.windows.insert(
            id,
            Managed {
                spec: *spec,
                want_focus: true,
                want_center: true,
                focused: None,
            },
        );
        Ok(id)
    }

    fn focus(&mut self, handle: ViewportId) {
        if let Some(win) = self.windows.get_mut(&handle) {
            win.want_focus = true;
        }
    }

    fn close(&mut self, handle: ViewportId) {
        self.windows.remove(&handle);
    }

    fn is_open(&self, handle: ViewportId) -> bool {
        self.windows.contains_key(&handle)
    }
}

/// Floating utility window: transparent title bar with hidden title,
/// closable and minimizable, fixed size.
fn builder(spec: &WindowSpec) -> ViewportBuilder {
    ViewportBuilder::default()
        .with_title(spec.kind.title())
        .with_inner_size(vec2(spec.width, spec.height))
        .with_visible(true)
        .with_active(true)
        .with_decorations(true)
        .with_resizable(false)
        .with_fullsize_content_view(true)
        .with_title_shown(false)
        .with_titlebar_shown(false)
        .with_close_button(true)
        .with_minimize_button(true)
        .with_maximize_button(false)
        .with_window_level(WindowLevel::AlwaysOnTop)
}

/// Center the window. Returns `true` once done.
#[cfg(target_os = "macos")]
fn center(_ctx: &Context, spec: &WindowSpec) -> bool {
    match crate::nswindow::center(spec.kind.title()) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("{}", e);
            true
        }
    }
}

/// Center the window on its monitor. Returns `true` once done.
#[cfg(not(target_os = "macos"))]
fn center(ctx: &Context, spec: &WindowSpec) -> bool {
    let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else {
        return false;
    };
    let pos = ((monitor - vec2(spec.width, spec.height)) / 2.0).max(vec2(0.0, 0.0));
    tracing::trace!(?pos, "centering window");
    ctx.send_viewport_cmd(ViewportCommand::OuterPosition(pos.to_pos2()));
    true
}
