//! Policy tables for classification and document loading.
//!
//! Tier boundaries, unit conversions and the timing-field fallback order are
//! plain data. Adding a unit or moving a boundary is a table edit; the loader
//! and analyzer only walk these tables.
//!
//! # Examples
//!
//! ```rust
//! use perfgate::{GateConfig, SeverityTier};
//!
//! let cfg = GateConfig::default();
//! assert_eq!(cfg.thresholds.classify(-5.0), SeverityTier::Improvement);
//! assert_eq!(cfg.thresholds.classify(20.0), SeverityTier::Warning);
//! assert_eq!(cfg.loader.units.factor(Some("us")), Some(1_000.0));
//! ```

use serde::Serialize;

use crate::{PerfGateError, measurement::SeverityTier};

/// Inclusive upper bounds, in percent change, of the first three tiers.
///
/// A comparison falls into the first tier whose bound it does not exceed.
/// Anything above `warning_max` is [`SeverityTier::Critical`], and so is a
/// NaN, which never compares below a bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Thresholds {
    /// `r <= improvement_max` is an improvement. **Default:** `-5.0`
    pub improvement_max: f64,
    /// `r <= acceptable_max` is acceptable. **Default:** `10.0`
    pub acceptable_max: f64,
    /// `r <= warning_max` is a warning. **Default:** `20.0`
    pub warning_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            improvement_max: -5.0,
            acceptable_max: 10.0,
            warning_max: 20.0,
        }
    }
}

impl Thresholds {
    pub fn new(
        improvement_max: f64,
        acceptable_max: f64,
        warning_max: f64,
    ) -> Result<Self, PerfGateError> {
        let bounds = [improvement_max, acceptable_max, warning_max];
        if bounds.iter().any(|bound| !bound.is_finite()) {
            return Err(PerfGateError::invalid_config("thresholds must be finite"));
        }
        if !(improvement_max < acceptable_max && acceptable_max < warning_max) {
            return Err(PerfGateError::invalid_config(format!(
                "thresholds must increase: {improvement_max} < {acceptable_max} < {warning_max}"
            )));
        }
        Ok(Self {
            improvement_max,
            acceptable_max,
            warning_max,
        })
    }

    /// Ordered cascade; the first bound that `regression_pct` does not exceed wins.
    pub fn classify(&self, regression_pct: f64) -> SeverityTier {
        let cascade = [
            (self.improvement_max, SeverityTier::Improvement),
            (self.acceptable_max, SeverityTier::Acceptable),
            (self.warning_max, SeverityTier::Warning),
        ];
        cascade
            .iter()
            .find(|(bound, _)| regression_pct <= *bound)
            .map(|(_, tier)| *tier)
            .unwrap_or(SeverityTier::Critical)
    }
}

/// Multipliers from a harness `time_unit` to nanoseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitTable {
    entries: Vec<(String, f64)>,
    default_unit: String,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            entries: vec![
                ("ns".into(), 1.0),
                ("us".into(), 1_000.0),
                ("ms".into(), 1_000_000.0),
                ("s".into(), 1_000_000_000.0),
            ],
            default_unit: "ns".into(),
        }
    }
}

impl UnitTable {
    /// Builds a table from `(unit, multiplier)` pairs. `default_unit` must be one of them.
    pub fn new<I, T>(entries: I, default_unit: T) -> Result<Self, PerfGateError>
    where
        I: IntoIterator<Item = (T, f64)>,
        T: Into<String>,
    {
        let entries: Vec<(String, f64)> = entries
            .into_iter()
            .map(|(unit, factor)| (unit.into(), factor))
            .collect();
        if let Some((unit, _)) = entries
            .iter()
            .find(|(_, factor)| !factor.is_finite() || *factor <= 0.0)
        {
            return Err(PerfGateError::invalid_config(format!(
                "unit {unit} needs a positive multiplier"
            )));
        }
        let default_unit = default_unit.into();
        if !entries.iter().any(|(unit, _)| *unit == default_unit) {
            return Err(PerfGateError::invalid_config(format!(
                "default unit {default_unit} is not in the table"
            )));
        }
        Ok(Self {
            entries,
            default_unit,
        })
    }

    /// Multiplier for `unit`; `None` selects the default unit.
    /// Returns `None` when the unit is not in the table.
    pub fn factor(&self, unit: Option<&str>) -> Option<f64> {
        let unit = unit.unwrap_or(&self.default_unit);
        self.entries
            .iter()
            .find(|(known, _)| known == unit)
            .map(|(_, factor)| *factor)
    }

    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(unit, _)| unit.as_str())
    }
}

/// What the loader does when one document names the same benchmark twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one and a diagnostic is recorded.
    #[default]
    LastWins,
    /// The document is rejected as malformed.
    Reject,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoaderConfig {
    pub units: UnitTable,
    /// Timing fields tried in order; the first one present is used.
    ///
    /// **Default:** `["real_time", "cpu_time"]`
    pub time_fields: Vec<String>,
    pub duplicates: DuplicatePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            units: UnitTable::default(),
            time_fields: vec!["real_time".into(), "cpu_time".into()],
            duplicates: DuplicatePolicy::default(),
        }
    }
}

/// Complete configuration of one gate run.
///
/// `GateConfig::default()` is what the `perfgate` binary uses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateConfig {
    pub thresholds: Thresholds,
    pub loader: LoaderConfig,
}

impl GateConfig {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.loader.duplicates = policy;
        self
    }

    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.loader.units = units;
        self
    }

    pub fn with_time_fields<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.loader.time_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}
