//! Benchmark regression gate.
//!
//! Loads a baseline and a current benchmark result document, matches them by
//! name, classifies every shared benchmark into a severity tier and reduces
//! the tiers to a pass/fail [`Verdict`]. The `perfgate` binary wraps
//! [`gate::run_gate`] for CI use.

pub(crate) mod observability;

pub mod analyzer;
pub mod bench_utils;
pub mod cli;
pub mod config;
pub mod errors;
pub mod gate;
pub mod loader;
pub mod measurement;
pub mod reconcile;
pub mod report;
pub mod verdict;

pub use crate::analyzer::{PairwiseAnalysis, analyze};
pub use crate::config::{DuplicatePolicy, GateConfig, LoaderConfig, Thresholds, UnitTable};
pub use crate::errors::PerfGateError;
pub use crate::gate::{GateOutcome, run_gate};
pub use crate::loader::{MeasurementMap, ResultDocument, load_document, parse_document};
pub use crate::measurement::{Measurement, SeverityTier};
pub use crate::observability::LOG_ENV;
pub use crate::reconcile::{DegenerateBaseline, Partition, Reconciliation, partition, reconcile};
pub use crate::verdict::{GatePolicy, Verdict, aggregate};
