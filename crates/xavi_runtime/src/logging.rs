//! Log subscriber setup for the command-line front end.
//!
//! Library crates only emit `tracing` events; installing a subscriber is left
//! to the binary.

use tracing_subscriber::EnvFilter;
use xavi_foundation::{Error, ErrorKind, Result};

/// Default filter directive for a verbosity level.
///
/// Negative is quiet (errors only), 0 shows warnings, and each step up adds
/// one level of detail down to `trace`.
#[must_use]
pub fn level_for(verbosity: i8) -> &'static str {
    match verbosity {
        i8::MIN..=-1 => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a formatting subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
///
/// # Errors
///
/// Returns `Internal` if a global subscriber is already installed.
pub fn init(verbosity: i8) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::new(ErrorKind::Internal(format!("failed to install logger: {e}"))))
}
