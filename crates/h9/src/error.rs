//! Error types and result alias for the h9 crate.
use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The window backend could not create a window.
    #[error("failed to create {kind} window: {message}")]
    WindowCreate {
        /// Window kind that was requested.
        kind: String,
        /// Backend-provided reason.
        message: String,
    },
    /// An external URL could not be handed to the OS.
    #[error("failed to open {url}: {source}")]
    Launch {
        /// The URL that was being opened.
        url: String,
        /// Underlying spawn error.
        source: io::Error,
    },
    /// Reading or writing the preference file failed.
    #[error("preference file {}: {source}", path.display())]
    PrefsIo {
        /// Path of the preference file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The preference file is not valid TOML.
    #[error("preference file {}: {source}", path.display())]
    PrefsParse {
        /// Path of the preference file.
        path: PathBuf,
        /// Parser error.
        source: toml_edit::TomlError,
    },
    /// A stored preference has an unexpected type.
    #[error("preference {key} is not a string")]
    PrefsType {
        /// Key that was read.
        key: String,
    },
    /// Operation requires the AppKit main thread.
    #[error("operation requires the AppKit main thread")]
    MainThread,
}
