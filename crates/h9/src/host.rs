//! Ownership of the single secondary window.
//!
//! [`WindowHost`] keeps at most one window alive. Asking for the window that
//! is already showing refocuses it; asking for a different kind closes the
//! current one first. Windows closed behind the host's back (through their
//! title-bar chrome) are noticed through [`WindowBackend::is_open`] and
//! replaced with a fresh window on the next request.
use std::fmt;

use tracing::{debug, warn};

use crate::Result;

/// Logical windows the host knows how to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    /// Shortcut map and permission status.
    Settings,
}

impl WindowKind {
    /// Window title; also the identity AppKit sees.
    pub fn title(self) -> &'static str {
        match self {
            Self::Settings => "Settings",
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Anything usable as a logical window identity.
pub trait WindowIdentity: Copy + Eq + fmt::Debug + fmt::Display {}

impl<T: Copy + Eq + fmt::Debug + fmt::Display> WindowIdentity for T {}

/// What to show and at which size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec<K = WindowKind> {
    /// Logical window identity.
    pub kind: K,
    /// Content width in points.
    pub width: f32,
    /// Content height in points.
    pub height: f32,
}

impl<K> WindowSpec<K> {
    /// Build a spec for `kind` at `width`×`height`.
    pub fn new(kind: K, width: f32, height: f32) -> Self {
        Self {
            kind,
            width,
            height,
        }
    }
}

/// OS-facing window operations used by the host.
pub trait WindowBackend<K = WindowKind> {
    /// Identifies one concrete window. A recreated window gets a new handle.
    type Handle: Copy + Eq + fmt::Debug;

    /// Create, center and focus a new floating utility window.
    fn create(&mut self, spec: &WindowSpec<K>) -> Result<Self::Handle>;
    /// Bring an existing window to the front and give it key focus.
    fn focus(&mut self, handle: Self::Handle);
    /// Close a window. Closing an already-closed window is a no-op.
    fn close(&mut self, handle: Self::Handle);
    /// Whether `handle` still refers to a live window.
    fn is_open(&self, handle: Self::Handle) -> bool;
}

/// Occupancy of the host's single window slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<K, H> {
    /// No secondary window.
    Empty,
    /// A window of `kind` is (or was, until checked) showing.
    Showing {
        /// Logical identity of the window.
        kind: K,
        /// Backend handle.
        handle: H,
    },
}

/// Outcome of [`WindowHost::show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    /// A new window was created into an empty slot.
    Created,
    /// The requested window was already showing and got focus.
    Refocused,
    /// A window of a different kind was closed and a new one created.
    Replaced,
}

/// Owner of at most one secondary window.
pub struct WindowHost<B, K = WindowKind>
where
    B: WindowBackend<K>,
{
    /// OS-facing operations.
    backend: B,
    /// Current window, if any.
    slot: Slot<K, B::Handle>,
}

impl<B, K> WindowHost<B, K>
where
    B: WindowBackend<K>,
    K: WindowIdentity,
{
    /// Create an empty host over `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slot: Slot::Empty,
        }
    }

    /// Show the window described by `spec`.
    ///
    /// On creation failure the slot is left empty and the error returned.
    pub fn show(&mut self, spec: &WindowSpec<K>) -> Result<Shown> {
        let replaced = match self.live_slot() {
            Slot::Showing { kind, handle } if kind == spec.kind => {
                debug!(%kind, ?handle, "refocusing window");
                self.backend.focus(handle);
                return Ok(Shown::Refocused);
            }
            Slot::Showing { kind, handle } => {
                debug!(%kind, ?handle, next = %spec.kind, "closing window for replacement");
                self.backend.close(handle);
                self.slot = Slot::Empty;
                true
            }
            Slot::Empty => false,
        };

        let handle = self.backend.create(spec).inspect_err(|e| {
            warn!("{}", e);
        })?;
        debug!(kind = %spec.kind, ?handle, "created window");
        self.slot = Slot::Showing {
            kind: spec.kind,
            handle,
        };
        Ok(if replaced {
            Shown::Replaced
        } else {
            Shown::Created
        })
    }

    /// Close the current window, if any.
    pub fn close(&mut self) {
        if let Slot::Showing { handle, .. } = self.slot {
            self.backend.close(handle);
        }
        self.slot = Slot::Empty;
    }

    /// Current slot, after dropping a window the user closed.
    pub fn live_slot(&mut self) -> Slot<K, B::Handle> {
        if let Slot::Showing { kind, handle } = self.slot
            && !self.backend.is_open(handle)
        {
            debug!(%kind, ?handle, "window was closed externally");
            self.slot = Slot::Empty;
        }
        self.slot
    }

    /// The window currently showing, if it is still open.
    pub fn current(&mut self) -> Option<(K, B::Handle)> {
        match self.live_slot() {
            Slot::Showing { kind, handle } => Some((kind, handle)),
            Slot::Empty => None,
        }
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::Error;

    /// Two-kind identity to exercise replacement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pane {
        A,
        B,
    }

    impl fmt::Display for Pane {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{self:?}")
        }
    }

    /// Backend that records calls; windows are plain integers.
    #[derive(Default)]
    struct Recorder {
        next: u32,
        open: HashSet<u32>,
        calls: Vec<String>,
        fail_create: bool,
    }

    impl Recorder {
        fn created(&self) -> usize {
            self.calls.iter().filter(|c| c.starts_with("create")).count()
        }
    }

    impl<K: WindowIdentity> WindowBackend<K> for Recorder {
        type Handle = u32;

        fn create(&mut self, spec: &WindowSpec<K>) -> Result<u32> {
            self.calls.push(format!("create {}", spec.kind));
            if self.fail_create {
                return Err(Error::WindowCreate {
                    kind: spec.kind.to_string(),
                    message: "refused".into(),
                });
            }
            self.next += 1;
            self.open.insert(self.next);
            Ok(self.next)
        }

        fn focus(&mut self, handle: u32) {
            self.calls.push(format!("focus {handle}"));
        }

        fn close(&mut self, handle: u32) {
            self.calls.push(format!("close {handle}"));
            self.open.remove(&handle);
        }

        fn is_open(&self, handle: u32) -> bool {
            self.open.contains(&handle)
        }
    }

    fn settings() -> WindowSpec {
        WindowSpec::new(WindowKind::Settings, 900.0, 600.0)
    }

    #[test]
    fn repeated_show_refocuses() {
        let mut host = WindowHost::new(Recorder::default());
        assert_eq!(host.show(&settings()).unwrap(), Shown::Created);
        assert_eq!(host.show(&settings()).unwrap(), Shown::Refocused);
        assert_eq!(host.show(&settings()).unwrap(), Shown::Refocused);
        assert_eq!(host.backend().created(), 1);
        assert_eq!(host.current(), Some((WindowKind::Settings, 1)));
        assert_eq!(host.backend().calls, ["create Settings", "focus 1", "focus 1"]);
    }

    #[test]
    fn different_kind_replaces() {
        let mut host: WindowHost<Recorder, Pane> = WindowHost::new(Recorder::default());
        let a = WindowSpec::new(Pane::A, 100.0, 100.0);
        let b = WindowSpec::new(Pane::B, 200.0, 100.0);
        assert_eq!(host.show(&a).unwrap(), Shown::Created);
        assert_eq!(host.show(&b).unwrap(), Shown::Replaced);

        assert_eq!(host.backend().created(), 2);
        assert_eq!(host.backend().open.len(), 1);
        assert_eq!(host.current(), Some((Pane::B, 2)));
        assert_eq!(host.backend().calls, ["create A", "close 1", "create B"]);
    }

    #[test]
    fn externally_closed_window_is_recreated() {
        let mut host = WindowHost::new(Recorder::default());
        host.show(&settings()).unwrap();
        host.backend_mut().open.clear();

        assert_eq!(host.current(), None);
        assert_eq!(host.show(&settings()).unwrap(), Shown::Created);
        assert_eq!(host.current(), Some((WindowKind::Settings, 2)));
        assert_eq!(host.backend().created(), 2);
    }

    #[test]
    fn failed_create_leaves_slot_empty() {
        let mut host = WindowHost::new(Recorder {
            fail_create: true,
            ..Recorder::default()
        });
        assert!(host.show(&settings()).is_err());
        assert_eq!(host.live_slot(), Slot::Empty);

        host.backend_mut().fail_create = false;
        assert_eq!(host.show(&settings()).unwrap(), Shown::Created);
    }

    #[test]
    fn close_empties_slot() {
        let mut host = WindowHost::new(Recorder::default());
        host.show(&settings()).unwrap();
        host.close();
        assert_eq!(host.live_slot(), Slot::Empty);
        assert!(host.backend().open.is_empty());
        host.close();
        assert_eq!(host.backend().calls, ["create Settings", "close 1"]);
    }
}
