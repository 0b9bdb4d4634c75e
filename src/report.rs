//! Text and JSON renderings of a [`Verdict`].
//!
//! Rendering holds no decision logic. Sections follow tier order, then the
//! added and removed benchmarks, then the summary and the closing status.

use serde::Serialize;
use serde_json::json;

use crate::{
    analyzer::PairwiseAnalysis,
    config::Thresholds,
    measurement::SeverityTier,
    verdict::Verdict,
};

const RULE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 50;

/// Context printed above the analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReportHeader {
    pub baseline: String,
    pub current: String,
    pub thresholds: Thresholds,
    /// Loader diagnostics, one line each.
    pub notes: Vec<String>,
}

impl ReportHeader {
    pub fn new<B: Into<String>, C: Into<String>>(baseline: B, current: C) -> Self {
        Self {
            baseline: baseline.into(),
            current: current.into(),
            ..Self::default()
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_notes(mut self, notes: Vec<String>) -> Self {
        self.notes = notes;
        self
    }
}

pub fn format_analysis(analysis: &PairwiseAnalysis) -> String {
    format!(
        "{} {:<width$} Baseline: {:10.1} ns  Current: {:10.1} ns  Change: {:+6.1}%",
        analysis.tier.symbol(),
        analysis.name,
        analysis.baseline_ns,
        analysis.current_ns,
        analysis.regression_pct,
        width = NAME_WIDTH,
    )
}

pub fn render_text(verdict: &Verdict, header: &ReportHeader) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let thresholds = &header.thresholds;
    let mut out = vec![
        "Performance Regression Check".to_string(),
        rule.clone(),
        format!("Baseline:  {}", header.baseline),
        format!("Current:   {}", header.current),
        format!(
            "Threshold: {}% regression (warning), {}% (critical)",
            thresholds.acceptable_max, thresholds.warning_max
        ),
        rule.clone(),
        String::new(),
    ];

    if !header.notes.is_empty() {
        out.push(format!("Skipped or adjusted entries ({}):", header.notes.len()));
        out.extend(header.notes.iter().map(|note| format!("  ! {note}")));
        out.push(String::new());
    }

    out.push("Regression Analysis:".to_string());
    out.push("-".repeat(RULE_WIDTH));

    for tier in SeverityTier::ALL {
        let bucket = verdict.bucket(tier);
        if bucket.is_empty() {
            continue;
        }
        out.push(String::new());
        out.push(section_title(tier, bucket.len()));
        if let Some(caption) = section_caption(tier, thresholds) {
            out.push(caption);
        }
        out.extend(bucket.iter().map(|a| format!("  {}", format_analysis(a))));
    }

    if !verdict.undefined.is_empty() {
        out.push(String::new());
        out.push(format!(
            "❔ Undefined Change ({} benchmarks):",
            verdict.undefined.len()
        ));
        out.push("   (baseline time is zero)".to_string());
        out.extend(verdict.undefined.iter().map(|d| {
            format!(
                "  {:<width$} Current: {:10.1} ns",
                d.name,
                d.current_ns,
                width = NAME_WIDTH
            )
        }));
    }

    if !verdict.current_only.is_empty() {
        out.push(String::new());
        out.push(format!("📝 New Benchmarks ({}):", verdict.current_only.len()));
        out.extend(verdict.current_only.iter().map(|name| format!("  + {name}")));
    }
    if !verdict.baseline_only.is_empty() {
        out.push(String::new());
        out.push(format!(
            "📝 Removed Benchmarks ({}):",
            verdict.baseline_only.len()
        ));
        out.extend(verdict.baseline_only.iter().map(|name| format!("  - {name}")));
    }

    out.push(String::new());
    out.push(rule.clone());
    out.push("Summary:".to_string());
    out.push(format!(
        "  Improvements:  {:3}",
        verdict.count(SeverityTier::Improvement)
    ));
    out.push(format!(
        "  Acceptable:    {:3}",
        verdict.count(SeverityTier::Acceptable)
    ));
    out.push(format!(
        "  Warnings:      {:3} ({}-{}% slower)",
        verdict.count(SeverityTier::Warning),
        thresholds.acceptable_max,
        thresholds.warning_max
    ));
    out.push(format!(
        "  Critical:      {:3} (>{}% slower)",
        verdict.count(SeverityTier::Critical),
        thresholds.warning_max
    ));
    if !verdict.undefined.is_empty() {
        out.push(format!("  Undefined:     {:3}", verdict.undefined.len()));
    }
    out.push(format!("  Total:         {:3}", verdict.total()));
    out.push(rule);
    out.push(String::new());
    out.extend(closing_status(verdict, thresholds));

    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Machine-readable report with the same content as [`render_text`].
pub fn render_json(verdict: &Verdict, header: &ReportHeader) -> serde_json::Result<String> {
    let summary = json!({
        "improvements": verdict.count(SeverityTier::Improvement),
        "acceptable": verdict.count(SeverityTier::Acceptable),
        "warnings": verdict.count(SeverityTier::Warning),
        "critical": verdict.count(SeverityTier::Critical),
        "undefined": verdict.undefined.len(),
        "total": verdict.total(),
    });
    serde_json::to_string_pretty(&json!({
        "header": header,
        "summary": summary,
        "verdict": verdict,
    }))
}

fn section_title(tier: SeverityTier, count: usize) -> String {
    match tier {
        SeverityTier::Improvement => format!("🎉 Performance Improvements ({count} benchmarks):"),
        SeverityTier::Acceptable => format!("✅ Acceptable Performance ({count} benchmarks):"),
        SeverityTier::Warning => format!("⚠️  Performance Warnings ({count} benchmarks):"),
        SeverityTier::Critical => format!("❌ CRITICAL REGRESSIONS ({count} benchmarks):"),
    }
}

fn section_caption(tier: SeverityTier, thresholds: &Thresholds) -> Option<String> {
    match tier {
        SeverityTier::Warning => Some(format!(
            "   ({}-{}% slower than baseline)",
            thresholds.acceptable_max, thresholds.warning_max
        )),
        SeverityTier::Critical => Some(format!(
            "   (>{}% slower than baseline - IMMEDIATE ACTION REQUIRED)",
            thresholds.warning_max
        )),
        SeverityTier::Improvement | SeverityTier::Acceptable => None,
    }
}

fn closing_status(verdict: &Verdict, thresholds: &Thresholds) -> Vec<String> {
    if !verdict.passed {
        vec![
            format!(
                "❌ FAIL: Critical regressions detected (>{}% slower)",
                thresholds.warning_max
            ),
            "   Action: Investigate and fix before merging".to_string(),
        ]
    } else if verdict.has_warnings() {
        vec![
            format!(
                "⚠️  WARNING: Performance regressions detected ({}-{}% slower)",
                thresholds.acceptable_max, thresholds.warning_max
            ),
            "   Action: Review and consider optimization".to_string(),
            format!(
                "   Status: PASS (within {}% threshold)",
                thresholds.warning_max
            ),
        ]
    } else {
        vec!["✅ PASS: No significant regressions detected".to_string()]
    }
}
