use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use crate::{
    PerfGateError,
    config::GateConfig,
    loader::{EntryDiagnostic, load_document},
    observability::{log_debug, log_info, log_warn},
    reconcile::reconcile,
    report::{ReportHeader, render_json, render_text},
    verdict::{GatePolicy, Verdict, aggregate},
};

/// Everything one gate run produced: the verdict plus the inputs' diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct GateOutcome {
    pub verdict: Verdict,
    pub baseline_path: PathBuf,
    pub current_path: PathBuf,
    pub baseline_diagnostics: Vec<EntryDiagnostic>,
    pub current_diagnostics: Vec<EntryDiagnostic>,
    config: GateConfig,
}

impl GateOutcome {
    pub fn report_header(&self) -> ReportHeader {
        let notes = self
            .baseline_diagnostics
            .iter()
            .map(|d| format!("baseline {d}"))
            .chain(
                self.current_diagnostics
                    .iter()
                    .map(|d| format!("current {d}")),
            )
            .collect();
        ReportHeader::new(
            self.baseline_path.display().to_string(),
            self.current_path.display().to_string(),
        )
        .with_thresholds(self.config.thresholds)
        .with_notes(notes)
    }

    pub fn render_text(&self) -> String {
        render_text(&self.verdict, &self.report_header())
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        render_json(&self.verdict, &self.report_header())
    }

    pub fn exit_code(&self, policy: GatePolicy) -> i32 {
        self.verdict.exit_code(policy)
    }
}

/// Loads both documents, reconciles them and aggregates the verdict.
///
/// Arguments are positional in the same order as the command line: current first.
pub fn run_gate<C: AsRef<Path>, B: AsRef<Path>>(
    current_path: C,
    baseline_path: B,
    config: &GateConfig,
) -> Result<GateOutcome, PerfGateError> {
    let current_path = current_path.as_ref();
    let baseline_path = baseline_path.as_ref();

    let baseline = load_document(baseline_path, &config.loader)?;
    let current = load_document(current_path, &config.loader)?;
    warn_diagnostics("baseline", &baseline.diagnostics);
    warn_diagnostics("current", &current.diagnostics);

    let mut reconciliation = reconcile(
        &baseline.measurements,
        &current.measurements,
        &config.thresholds,
    )?;
    // A benchmark whose entry was skipped in one run still exists there; it
    // is neither added nor removed, and its diagnostic explains the gap.
    let skipped_in_current = skipped_names(&current.diagnostics);
    let skipped_in_baseline = skipped_names(&baseline.diagnostics);
    reconciliation
        .baseline_only
        .retain(|name| !skipped_in_current.contains(name.as_str()));
    reconciliation
        .current_only
        .retain(|name| !skipped_in_baseline.contains(name.as_str()));
    log_debug!(
        component = "gate",
        event = "reconciled",
        analyzed = reconciliation.analyses.len(),
        undefined = reconciliation.undefined.len(),
        baseline_only = reconciliation.baseline_only.len(),
        current_only = reconciliation.current_only.len(),
    );
    for degenerate in &reconciliation.undefined {
        log_warn!(
            component = "gate",
            event = "degenerate_baseline",
            name = %degenerate.name,
            current_ns = degenerate.current_ns,
        );
    }

    let verdict = aggregate(reconciliation);
    log_info!(
        component = "gate",
        event = "verdict_ready",
        passed = verdict.passed,
        warnings = verdict.warnings.len(),
        criticals = verdict.criticals.len(),
    );

    Ok(GateOutcome {
        verdict,
        baseline_path: baseline_path.to_path_buf(),
        current_path: current_path.to_path_buf(),
        baseline_diagnostics: baseline.diagnostics,
        current_diagnostics: current.diagnostics,
        config: config.clone(),
    })
}

fn skipped_names(diagnostics: &[EntryDiagnostic]) -> BTreeSet<&str> {
    diagnostics
        .iter()
        .filter(|d| d.issue.skips_entry())
        .filter_map(|d| d.name.as_deref())
        .collect()
}

fn warn_diagnostics(source: &str, diagnostics: &[EntryDiagnostic]) {
    for diagnostic in diagnostics {
        log_warn!(
            component = "loader",
            event = "entry_diagnostic",
            source,
            index = diagnostic.index,
            name = diagnostic.name.as_deref().unwrap_or(""),
            issue = %diagnostic.issue,
        );
    }
}
