use std::path::{Path, PathBuf};

use thiserror::Error;

/// Exit code for operational failures: unreadable input, bad documents,
/// nothing to compare, or a malformed command line.
pub const EXIT_OPERATIONAL: i32 = 2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PerfGateError {
    #[error("cannot read {}: {reason}", path.display())]
    DocumentNotFound { path: PathBuf, reason: String },
    #[error("invalid document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },
    #[error("no common benchmarks found between baseline and current")]
    NoCommonBenchmarks,
    #[error("baseline time for {name} is zero; percent change is undefined")]
    DegenerateBaseline { name: String, current_ns: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Usage(String),
}

impl PerfGateError {
    pub fn not_found<P: AsRef<Path>, T: Into<String>>(path: P, reason: T) -> Self {
        PerfGateError::DocumentNotFound {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn malformed<P: AsRef<Path>, T: Into<String>>(path: P, reason: T) -> Self {
        PerfGateError::MalformedDocument {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn degenerate<T: Into<String>>(name: T, current_ns: f64) -> Self {
        PerfGateError::DegenerateBaseline {
            name: name.into(),
            current_ns,
        }
    }

    pub fn invalid_config<T: Into<String>>(msg: T) -> Self {
        PerfGateError::InvalidConfig(msg.into())
    }

    pub fn usage<T: Into<String>>(msg: T) -> Self {
        PerfGateError::Usage(msg.into())
    }

    /// Every error that reaches the process boundary is operational.
    pub fn exit_code(&self) -> i32 {
        EXIT_OPERATIONAL
    }
}
