#![warn(missing_docs)]

//! Shared logging helpers and CLI argument definitions for the h9 workspace.
//!
//! The binary flattens [`LogArgs`] into its CLI and hands it to [`init`].

use std::env;

use clap::Args;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, util::TryInitError};

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "h9=trace,permissions=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Resolve these flags (and `RUST_LOG`) into a filter spec.
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }
}

/// Targets whose logs the level flags apply to.
pub const OUR_CRATES: &[&str] = &["h9", "permissions", "logging"];

/// Directive setting `level` for every target in [`OUR_CRATES`].
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    OUR_CRATES
        .iter()
        .map(|t| format!("{t}={lvl}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolve a filter directive. An explicit filter wins, then `trace`, then
/// `debug`, then `log_level`, then `RUST_LOG`, and finally `info` for our
/// targets.
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    let level = match (trace, debug) {
        (true, _) => Some("trace"),
        (false, true) => Some("debug"),
        (false, false) => log_level,
    };
    match (log_filter, level) {
        (Some(spec), _) => spec.to_string(),
        (None, Some(lvl)) => level_spec_for(lvl),
        (None, None) => env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info")),
    }
}

/// Install the global subscriber: `EnvFilter` from `args`, compact output
/// without timestamps.
///
/// Fails if a global subscriber is already installed; the existing one stays
/// in place.
pub fn init(args: &LogArgs) -> Result<(), TryInitError> {
    let filter = EnvFilter::new(args.spec());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_spec_covers_every_crate() {
        let spec = level_spec_for("DEBUG");
        assert_eq!(spec, "h9=debug,permissions=debug,logging=debug");
    }

    #[test]
    fn explicit_filter_wins() {
        let spec = compute_spec(true, true, Some("warn"), Some("h9=trace"));
        assert_eq!(spec, "h9=trace");
    }

    #[test]
    fn trace_beats_debug_and_level() {
        assert_eq!(compute_spec(true, false, Some("warn"), None), level_spec_for("trace"));
        assert_eq!(compute_spec(false, true, Some("warn"), None), level_spec_for("debug"));
        assert_eq!(compute_spec(false, false, Some("warn"), None), level_spec_for("warn"));
    }

    #[test]
    fn no_flags_is_info_or_env() {
        let spec = compute_spec(false, false, None, None);
        match env::var("RUST_LOG") {
            Ok(v) => assert_eq!(spec, v),
            Err(_) => assert_eq!(spec, level_spec_for("info")),
        }
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        let args = LogArgs::default();
        let _first = init(&args);
        assert!(init(&args).is_err());
    }

    #[test]
    fn args_resolve_through_compute_spec() {
        let args = LogArgs {
            log_level: Some("error".into()),
            ..LogArgs::default()
        };
        assert_eq!(args.spec(), level_spec_for("error"));
    }
}
