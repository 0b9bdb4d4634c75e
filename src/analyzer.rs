use serde::Serialize;

use crate::{
    PerfGateError,
    config::Thresholds,
    measurement::{Measurement, SeverityTier},
};

/// Comparison of one benchmark across the baseline and current runs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairwiseAnalysis {
    pub name: String,
    pub baseline_ns: f64,
    pub current_ns: f64,
    /// Signed percent change; positive means the current run is slower.
    pub regression_pct: f64,
    pub tier: SeverityTier,
}

/// `(current - baseline) / baseline * 100`, or `None` when the baseline is zero.
///
/// A tiny non-zero baseline can overflow to `+inf`; that is still a defined
/// (critical) slowdown, not a degenerate baseline.
pub fn regression_pct(baseline_ns: f64, current_ns: f64) -> Option<f64> {
    if baseline_ns == 0.0 {
        return None;
    }
    Some(((current_ns - baseline_ns) / baseline_ns) * 100.0)
}

/// Classifies `current` against `baseline`.
///
/// A zero baseline yields [`PerfGateError::DegenerateBaseline`]; callers are
/// expected to report it as undefined rather than abort.
pub fn analyze(
    baseline: &Measurement,
    current: &Measurement,
    thresholds: &Thresholds,
) -> Result<PairwiseAnalysis, PerfGateError> {
    let regression_pct = regression_pct(baseline.time_ns, current.time_ns)
        .ok_or_else(|| PerfGateError::degenerate(baseline.name.as_str(), current.time_ns))?;
    Ok(PairwiseAnalysis {
        name: baseline.name.clone(),
        baseline_ns: baseline.time_ns,
        current_ns: current.time_ns,
        regression_pct,
        tier: thresholds.classify(regression_pct),
    })
}
