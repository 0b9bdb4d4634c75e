use std::path::PathBuf;

use crate::{
    PerfGateError,
    config::GateConfig,
    gate::run_gate,
    verdict::GatePolicy,
};

const USAGE: &str = "\
Usage: perfgate CURRENT_RESULTS.json BASELINE.json

Example:
  # Run benchmark
  ./my_benchmark --benchmark_out=current.json --benchmark_out_format=json

  # Check for regressions
  perfgate current.json benchmark_results/baseline.json

Exit codes: 0 pass, 1 critical regression, 2 error";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub current: PathBuf,
    pub baseline: PathBuf,
}

impl CommandLineConfig {
    /// Parses `argv`, program name included. Exactly two positionals are accepted.
    pub fn from_args(args: &[&str]) -> Result<Self, PerfGateError> {
        match args {
            [_, current, baseline] => Ok(Self {
                current: PathBuf::from(*current),
                baseline: PathBuf::from(*baseline),
            }),
            _ => Err(PerfGateError::usage(Self::usage())),
        }
    }

    pub fn usage() -> &'static str {
        USAGE
    }
}

/// Rendered report and the exit code the process should end with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliRun {
    pub report: String,
    pub exit_code: i32,
}

pub fn execute(config: &CommandLineConfig) -> Result<CliRun, PerfGateError> {
    let outcome = run_gate(&config.current, &config.baseline, &GateConfig::default())?;
    Ok(CliRun {
        report: outcome.render_text(),
        exit_code: outcome.exit_code(GatePolicy::Default),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_takes_current_then_baseline() {
        let cfg = CommandLineConfig::from_args(&["perfgate", "cur.json", "base.json"])
            .expect("two positionals");
        assert_eq!(cfg.current, PathBuf::from("cur.json"));
        assert_eq!(cfg.baseline, PathBuf::from("base.json"));
    }

    #[test]
    fn test_from_args_rejects_wrong_arity() {
        for args in [
            vec!["perfgate"],
            vec!["perfgate", "cur.json"],
            vec!["perfgate", "a", "b", "c"],
        ] {
            let err = CommandLineConfig::from_args(&args).unwrap_err();
            assert!(matches!(err, PerfGateError::Usage(ref text) if text.starts_with("Usage:")));
            assert_eq!(err.exit_code(), 2);
        }
    }
}
