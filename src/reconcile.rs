use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
    PerfGateError,
    analyzer::{PairwiseAnalysis, analyze},
    config::Thresholds,
    loader::MeasurementMap,
};

/// Benchmark names split by which run reports them. All three sets are disjoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub common: BTreeSet<String>,
    pub baseline_only: BTreeSet<String>,
    pub current_only: BTreeSet<String>,
}

/// A common benchmark whose baseline time is zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DegenerateBaseline {
    pub name: String,
    pub current_ns: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reconciliation {
    /// Sorted by name.
    pub analyses: Vec<PairwiseAnalysis>,
    /// Sorted by name.
    pub undefined: Vec<DegenerateBaseline>,
    pub baseline_only: Vec<String>,
    pub current_only: Vec<String>,
}

pub fn partition(baseline: &MeasurementMap, current: &MeasurementMap) -> Partition {
    let mut parts = Partition::default();
    for name in baseline.keys() {
        if current.contains_key(name) {
            parts.common.insert(name.clone());
        } else {
            parts.baseline_only.insert(name.clone());
        }
    }
    parts.current_only = current
        .keys()
        .filter(|name| !baseline.contains_key(*name))
        .cloned()
        .collect();
    parts
}

/// Matches the two runs by name and analyzes every common benchmark.
///
/// Fails with [`PerfGateError::NoCommonBenchmarks`] when the runs share no name.
pub fn reconcile(
    baseline: &MeasurementMap,
    current: &MeasurementMap,
    thresholds: &Thresholds,
) -> Result<Reconciliation, PerfGateError> {
    let parts = partition(baseline, current);
    if parts.common.is_empty() {
        return Err(PerfGateError::NoCommonBenchmarks);
    }

    let mut analyses = Vec::with_capacity(parts.common.len());
    let mut undefined = Vec::new();
    for name in &parts.common {
        let (Some(base), Some(cur)) = (baseline.get(name), current.get(name)) else {
            continue;
        };
        match analyze(base, cur, thresholds) {
            Ok(analysis) => analyses.push(analysis),
            Err(PerfGateError::DegenerateBaseline { name, current_ns }) => {
                undefined.push(DegenerateBaseline { name, current_ns })
            }
            Err(other) => return Err(other),
        }
    }

    Ok(Reconciliation {
        analyses,
        undefined,
        baseline_only: parts.baseline_only.into_iter().collect(),
        current_only: parts.current_only.into_iter().collect(),
    })
}
