use std::{collections::BTreeSet, path::Path};

use perfgate::{
    LoaderConfig, Measurement, MeasurementMap, PerfGateError, SeverityTier, Thresholds,
    bench_utils::{Drift, generate_documents},
    parse_document, partition, reconcile,
};

fn runs(entries: &[(&str, f64)]) -> MeasurementMap {
    entries
        .iter()
        .map(|(name, time_ns)| (name.to_string(), Measurement::new(*name, *time_ns)))
        .collect()
}

#[test]
fn test_partition_splits_added_and_removed() {
    let baseline = runs(&[("A", 100.0), ("B", 200.0)]);
    let current = runs(&[("B", 210.0), ("C", 50.0)]);
    let reconciliation = reconcile(&baseline, &current, &Thresholds::default()).expect("reconcile");
    assert_eq!(reconciliation.baseline_only, vec!["A".to_string()]);
    assert_eq!(reconciliation.current_only, vec!["C".to_string()]);
    assert_eq!(reconciliation.analyses.len(), 1);
    let b = &reconciliation.analyses[0];
    assert_eq!(b.name, "B");
    assert_eq!(b.regression_pct, 5.0);
    assert_eq!(b.tier, SeverityTier::Acceptable);
}

#[test]
fn test_disjoint_runs_fail() {
    let baseline = runs(&[("A", 100.0)]);
    let current = runs(&[("B", 100.0)]);
    let err = reconcile(&baseline, &current, &Thresholds::default()).unwrap_err();
    assert_eq!(err, PerfGateError::NoCommonBenchmarks);
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_empty_runs_fail() {
    let err = reconcile(&runs(&[]), &runs(&[]), &Thresholds::default()).unwrap_err();
    assert_eq!(err, PerfGateError::NoCommonBenchmarks);
}

#[test]
fn test_zero_baseline_is_reported_as_undefined() {
    let baseline = runs(&[("A", 0.0), ("B", 100.0)]);
    let current = runs(&[("A", 10.0), ("B", 101.0)]);
    let reconciliation = reconcile(&baseline, &current, &Thresholds::default()).expect("reconcile");
    assert_eq!(reconciliation.undefined.len(), 1);
    assert_eq!(reconciliation.undefined[0].name, "A");
    assert_eq!(reconciliation.undefined[0].current_ns, 10.0);
    let names: Vec<_> = reconciliation.analyses.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["B"]);
}

#[test]
fn test_analyses_are_sorted_by_name() {
    let baseline = runs(&[("zeta", 1.0), ("alpha", 1.0), ("mid", 1.0), ("Beta", 1.0)]);
    let current = runs(&[("mid", 3.0), ("zeta", 1.0), ("Beta", 0.5), ("alpha", 1.1)]);
    let reconciliation = reconcile(&baseline, &current, &Thresholds::default()).expect("reconcile");
    let names: Vec<_> = reconciliation.analyses.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Beta", "alpha", "mid", "zeta"]);
}

#[test]
fn test_partition_covers_union_without_overlap() {
    let config = LoaderConfig::default();
    for seed in [1_u64, 7, 42] {
        let pair = generate_documents(120, Drift::Uniform { max_pct: 40.0 }, seed);
        let baseline = parse_document(Path::new("b.json"), &pair.baseline_bytes(), &config)
            .expect("baseline")
            .measurements;
        let current = parse_document(Path::new("c.json"), &pair.current_bytes(), &config)
            .expect("current")
            .measurements;
        let parts = partition(&baseline, &current);

        let union: BTreeSet<String> = baseline.keys().chain(current.keys()).cloned().collect();
        let covered: BTreeSet<String> = parts
            .common
            .iter()
            .chain(&parts.baseline_only)
            .chain(&parts.current_only)
            .cloned()
            .collect();
        assert_eq!(covered, union);
        assert_eq!(
            parts.common.len() + parts.baseline_only.len() + parts.current_only.len(),
            union.len()
        );
        assert!(parts.common.is_disjoint(&parts.baseline_only));
        assert!(parts.common.is_disjoint(&parts.current_only));
        assert!(parts.baseline_only.is_disjoint(&parts.current_only));
        assert_eq!(parts.baseline_only.len(), 120 / 16);
        assert_eq!(parts.current_only.len(), 120 / 20);
    }
}
