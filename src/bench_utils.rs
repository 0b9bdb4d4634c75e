use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Value, json};

const UNITS: [(&str, f64); 3] = [("ns", 1.0), ("us", 1_000.0), ("ms", 1_000_000.0)];

#[derive(Clone, Debug)]
pub struct DocumentPair {
    pub baseline: Value,
    pub current: Value,
}

impl DocumentPair {
    pub fn baseline_bytes(&self) -> Vec<u8> {
        self.baseline.to_string().into_bytes()
    }

    pub fn current_bytes(&self) -> Vec<u8> {
        self.current.to_string().into_bytes()
    }
}

/// How current times move relative to their baseline.
#[derive(Clone, Copy, Debug)]
pub enum Drift {
    /// Every change stays within the acceptable band.
    Stable,
    /// Change drawn uniformly from `-max_pct..=max_pct`.
    Uniform { max_pct: f64 },
    /// Every benchmark slower by exactly `pct`.
    Regressed { pct: f64 },
}

/// Builds a harness-shaped baseline/current pair.
///
/// Every 16th baseline benchmark is missing from the current run and
/// `count / 20` benchmarks exist only in the current run. Output depends
/// only on the arguments.
pub fn generate_documents(count: usize, drift: Drift, seed: u64) -> DocumentPair {
    assert!(count > 0, "count must be positive");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut baseline = Vec::with_capacity(count);
    let mut current = Vec::with_capacity(count + count / 20);
    for idx in 0..count {
        let name = format!("BM_Synthetic/{idx}");
        let base_ns = rng.gen_range(50.0..5_000_000.0);
        baseline.push(harness_entry(&name, base_ns, &mut rng));
        if idx % 16 == 15 {
            continue;
        }
        let pct = match drift {
            Drift::Stable => rng.gen_range(-4.0..=9.0),
            Drift::Uniform { max_pct } => rng.gen_range(-max_pct..=max_pct),
            Drift::Regressed { pct } => pct,
        };
        current.push(harness_entry(&name, base_ns * (1.0 + pct / 100.0), &mut rng));
    }
    for idx in 0..count / 20 {
        let time_ns = rng.gen_range(50.0..5_000_000.0);
        current.push(harness_entry(&format!("BM_Added/{idx}"), time_ns, &mut rng));
    }
    DocumentPair {
        baseline: wrap(baseline),
        current: wrap(current),
    }
}

/// A document whose entries carry `real_time` in nanoseconds.
pub fn document(entries: &[(&str, f64)]) -> Value {
    wrap(
        entries
            .iter()
            .map(|(name, time_ns)| entry(name, *time_ns, "ns"))
            .collect(),
    )
}

pub fn entry(name: &str, real_time: f64, time_unit: &str) -> Value {
    json!({
        "name": name,
        "run_type": "iteration",
        "iterations": 1000,
        "real_time": real_time,
        "cpu_time": real_time,
        "time_unit": time_unit,
    })
}

fn harness_entry(name: &str, time_ns: f64, rng: &mut StdRng) -> Value {
    let (unit, factor) = UNITS[rng.gen_range(0..UNITS.len())];
    let mut value = entry(name, time_ns / factor, unit);
    if rng.gen_bool(0.5) {
        value["items_per_second"] = json!(1e9 / time_ns.max(1.0));
    }
    value
}

fn wrap(entries: Vec<Value>) -> Value {
    json!({
        "context": {
            "library_build_type": "release",
            "num_cpus": 8,
        },
        "benchmarks": entries,
    })
}
