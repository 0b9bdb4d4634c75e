use serde::Serialize;

use crate::{
    analyzer::PairwiseAnalysis,
    measurement::SeverityTier,
    reconcile::{DegenerateBaseline, Reconciliation},
};

/// No critical regression (warnings allowed under the default policy).
pub const EXIT_PASS: i32 = 0;
/// At least one regression the policy treats as failing.
pub const EXIT_REGRESSION: i32 = 1;

/// How strictly a caller treats warnings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GatePolicy {
    /// Only critical regressions fail.
    #[default]
    Default,
    /// Warnings fail as well.
    Strict,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Verdict {
    pub improvements: Vec<PairwiseAnalysis>,
    pub acceptable: Vec<PairwiseAnalysis>,
    pub warnings: Vec<PairwiseAnalysis>,
    pub criticals: Vec<PairwiseAnalysis>,
    pub undefined: Vec<DegenerateBaseline>,
    pub baseline_only: Vec<String>,
    pub current_only: Vec<String>,
    /// `true` iff `criticals` is empty.
    pub passed: bool,
}

impl Default for Verdict {
    /// An empty verdict: no critical bucket, so it has passed.
    fn default() -> Self {
        Self {
            improvements: Vec::new(),
            acceptable: Vec::new(),
            warnings: Vec::new(),
            criticals: Vec::new(),
            undefined: Vec::new(),
            baseline_only: Vec::new(),
            current_only: Vec::new(),
            passed: true,
        }
    }
}

impl Verdict {
    pub fn bucket(&self, tier: SeverityTier) -> &[PairwiseAnalysis] {
        match tier {
            SeverityTier::Improvement => &self.improvements,
            SeverityTier::Acceptable => &self.acceptable,
            SeverityTier::Warning => &self.warnings,
            SeverityTier::Critical => &self.criticals,
        }
    }

    pub fn count(&self, tier: SeverityTier) -> usize {
        self.bucket(tier).len()
    }

    /// Number of classified benchmarks; undefined ones are not counted.
    pub fn total(&self) -> usize {
        SeverityTier::ALL.iter().map(|tier| self.count(*tier)).sum()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn passes(&self, policy: GatePolicy) -> bool {
        match policy {
            GatePolicy::Default => self.passed,
            GatePolicy::Strict => self.passed && !self.has_warnings(),
        }
    }

    pub fn exit_code(&self, policy: GatePolicy) -> i32 {
        if self.passes(policy) {
            EXIT_PASS
        } else {
            EXIT_REGRESSION
        }
    }
}

/// Buckets the analyses by tier. Order within a bucket follows the input order.
pub fn aggregate(reconciliation: Reconciliation) -> Verdict {
    let Reconciliation {
        analyses,
        undefined,
        baseline_only,
        current_only,
    } = reconciliation;
    let mut verdict = Verdict {
        undefined,
        baseline_only,
        current_only,
        ..Verdict::default()
    };
    for analysis in analyses {
        match analysis.tier {
            SeverityTier::Improvement => verdict.improvements.push(analysis),
            SeverityTier::Acceptable => verdict.acceptable.push(analysis),
            SeverityTier::Warning => verdict.warnings.push(analysis),
            SeverityTier::Critical => verdict.criticals.push(analysis),
        }
    }
    verdict.passed = verdict.criticals.is_empty();
    verdict
}
