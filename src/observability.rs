//! Logging conventions for perfgate.
//!
//! All events go through `tracing` with target `perfgate` and carry an
//! `event` field. The library never installs a subscriber; the `perfgate`
//! binary does, writing to stderr so stdout stays reserved for the report.

/// Target for all perfgate log events.
pub(crate) const PERFGATE_TARGET: &str = "perfgate";

/// Environment variable holding the `EnvFilter` directive for the binary.
pub const LOG_ENV: &str = "PERFGATE_LOG";

/// Macro for info-level log events.
///
/// # Example
/// ```ignore
/// log_info!(
///     component = "gate",
///     event = "verdict_ready",
///     passed = verdict.passed,
/// );
/// ```
macro_rules! log_info {
    ($($field:tt)*) => {
        ::tracing::info!(target: $crate::observability::PERFGATE_TARGET, $($field)*)
    };
}

macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::PERFGATE_TARGET, $($field)*)
    };
}

macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::PERFGATE_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_info;
pub(crate) use log_warn;
