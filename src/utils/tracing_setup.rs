//! Diagnostic logging through `tracing`.
//!
//! The interactive UI owns the terminal, so diagnostics there only go to a
//! file. `RUST_LOG` overrides the default filter in every mode.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceTarget {
    /// Append to a file (`--trace-file`).
    File(PathBuf),
    /// Warnings and errors on stderr; used by non-interactive commands.
    Stderr,
    /// No subscriber at all.
    Disabled,
}

impl TraceTarget {
    pub fn select(trace_file: Option<PathBuf>, interactive: bool) -> Self {
        match (trace_file, interactive) {
            (Some(path), _) => TraceTarget::File(path),
            (None, true) => TraceTarget::Disabled,
            (None, false) => TraceTarget::Stderr,
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            TraceTarget::File(_) => "quickreply=debug,info",
            TraceTarget::Stderr | TraceTarget::Disabled => "warn",
        }
    }
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Install the global subscriber for `target`.
///
/// Calling this a second time leaves the first subscriber in place.
pub fn init_tracing(target: &TraceTarget) -> Result<(), Box<dyn Error>> {
    let filter = env_filter(target.default_directive());

    match target {
        TraceTarget::Disabled => Ok(()),
        TraceTarget::Stderr => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();
            Ok(())
        }
        TraceTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init();
            Ok(())
        }
    }
}
