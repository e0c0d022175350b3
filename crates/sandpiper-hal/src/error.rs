use thiserror::Error;

use crate::platform::Platform;

/// Startup-time hardware failures.
///
/// These are the only errors the core raises to the process boundary; once
/// the tree is ticking, recoverable conditions travel as `Status` values,
/// never as errors.
#[derive(Debug, Error)]
pub enum HalError {
    /// No concrete driver exists for this device on the running platform.
    #[error("no {device} driver available on {platform:?}")]
    HardwareUnavailable {
        device: &'static str,
        platform: Platform,
    },

    #[error("{device} setup failed: {reason}")]
    SetupFailed {
        device: &'static str,
        reason: String,
    },
}
