use std::fmt;

use serde::Serialize;

/// One named benchmark result with its time normalized to nanoseconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Measurement {
    pub name: String,
    pub time_ns: f64,
    /// Throughput as reported by the harness. `None` when absent or zero.
    pub items_per_sec: Option<f64>,
    pub label: Option<String>,
}

impl Measurement {
    pub fn new<T: Into<String>>(name: T, time_ns: f64) -> Self {
        Self {
            name: name.into(),
            time_ns,
            items_per_sec: None,
            label: None,
        }
    }

    pub fn with_throughput(mut self, items_per_sec: f64) -> Self {
        self.items_per_sec = (items_per_sec > 0.0).then_some(items_per_sec);
        self
    }

    pub fn with_label<T: Into<String>>(mut self, label: T) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }
}

/// Severity of one baseline/current comparison, ordered from best to worst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Improvement,
    Acceptable,
    Warning,
    Critical,
}

impl SeverityTier {
    /// Report order: improvement, acceptable, warning, critical.
    pub const ALL: [SeverityTier; 4] = [
        SeverityTier::Improvement,
        SeverityTier::Acceptable,
        SeverityTier::Warning,
        SeverityTier::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::Improvement => "improvement",
            SeverityTier::Acceptable => "acceptable",
            SeverityTier::Warning => "warning",
            SeverityTier::Critical => "critical",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SeverityTier::Improvement | SeverityTier::Acceptable => "✅",
            SeverityTier::Warning => "⚠️",
            SeverityTier::Critical => "❌",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
