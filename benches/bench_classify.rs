use std::{path::Path, time::Duration};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use perfgate::{
    GateConfig, aggregate,
    bench_utils::{Drift, generate_documents},
    parse_document, reconcile,
};

const SEED: u64 = 0x5EED;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn bench_scales() -> &'static [usize] {
    #[cfg(feature = "bench-ci")]
    {
        &[100, 1_000]
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        &[100, 1_000, 10_000]
    }
}

fn bench_load(c: &mut Criterion) {
    let config = GateConfig::default();
    let mut group = c.benchmark_group("load_document");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &count in bench_scales() {
        let bytes = generate_documents(count, Drift::Stable, SEED + count as u64).baseline_bytes();
        group.bench_with_input(BenchmarkId::from_parameter(count), &bytes, |b, bytes| {
            b.iter(|| parse_document(Path::new("bench.json"), bytes, &config.loader))
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let config = GateConfig::default();
    let mut group = c.benchmark_group("reconcile_aggregate");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for &count in bench_scales() {
        let pair = generate_documents(count, Drift::Uniform { max_pct: 30.0 }, SEED ^ count as u64);
        let baseline = parse_document(Path::new("baseline.json"), &pair.baseline_bytes(), &config.loader)
            .expect("baseline");
        let current = parse_document(Path::new("current.json"), &pair.current_bytes(), &config.loader)
            .expect("current");
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| {
                reconcile(&baseline.measurements, &current.measurements, &config.thresholds)
                    .map(aggregate)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_classify);
criterion_main!(benches);
