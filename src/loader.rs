use std::{fmt, fs, path::Path};

use ahash::AHashMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    PerfGateError,
    config::{DuplicatePolicy, LoaderConfig},
    measurement::Measurement,
    observability::log_debug,
};

pub type MeasurementMap = AHashMap<String, Measurement>;

/// A parsed result document plus what went wrong with individual entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultDocument {
    pub measurements: MeasurementMap,
    pub diagnostics: Vec<EntryDiagnostic>,
}

impl ResultDocument {
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Measurement> {
        self.measurements.get(name)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &EntryDiagnostic> {
        self.diagnostics.iter().filter(|d| d.issue.skips_entry())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntryDiagnostic {
    /// Position of the entry in the `benchmarks` array.
    pub index: usize,
    pub name: Option<String>,
    pub issue: EntryIssue,
}

impl fmt::Display for EntryDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "entry #{} ({name}): {}", self.index, self.issue),
            None => write!(f, "entry #{}: {}", self.index, self.issue),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryIssue {
    /// Not an object, or no non-empty string `name`. Skipped.
    MissingName,
    /// Timing field present but not a finite, non-negative number once
    /// scaled to nanoseconds. Skipped.
    InvalidTime { field: String },
    /// `time_unit` not in the unit table. Skipped.
    UnknownUnit { unit: String },
    /// No timing field at all. Kept with `time_ns = 0`.
    NoTiming,
    /// An earlier entry with the same name was replaced.
    DuplicateName,
}

impl EntryIssue {
    pub fn skips_entry(&self) -> bool {
        matches!(
            self,
            EntryIssue::MissingName | EntryIssue::InvalidTime { .. } | EntryIssue::UnknownUnit { .. }
        )
    }
}

impl fmt::Display for EntryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryIssue::MissingName => f.write_str("missing benchmark name, skipped"),
            EntryIssue::InvalidTime { field } => {
                write!(f, "{field} is not a finite non-negative time, skipped")
            }
            EntryIssue::UnknownUnit { unit } => write!(f, "unknown time_unit {unit:?}, skipped"),
            EntryIssue::NoTiming => f.write_str("no timing field, recorded as 0 ns"),
            EntryIssue::DuplicateName => f.write_str("duplicate name, earlier entry replaced"),
        }
    }
}

/// Reads and parses one result document from disk.
pub fn load_document<P: AsRef<Path>>(
    path: P,
    config: &LoaderConfig,
) -> Result<ResultDocument, PerfGateError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|err| PerfGateError::not_found(path, err.to_string()))?;
    let document = parse_document(path, &data, config)?;
    log_debug!(
        component = "loader",
        event = "document_loaded",
        path = %path.display(),
        measurements = document.len(),
        diagnostics = document.diagnostics.len(),
    );
    Ok(document)
}

/// Parses document bytes; `source` is only used in error messages.
pub fn parse_document(
    source: &Path,
    data: &[u8],
    config: &LoaderConfig,
) -> Result<ResultDocument, PerfGateError> {
    let root: Value =
        serde_json::from_slice(data).map_err(|e| PerfGateError::malformed(source, e.to_string()))?;
    let root = root
        .as_object()
        .ok_or_else(|| PerfGateError::malformed(source, "top level must be an object"))?;
    let entries = match root.get("benchmarks") {
        None | Some(Value::Null) => return Ok(ResultDocument::default()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(PerfGateError::malformed(
                source,
                "\"benchmarks\" must be an array",
            ));
        }
    };

    let mut document = ResultDocument::default();
    for (index, entry) in entries.iter().enumerate() {
        let (measurement, issue) = match parse_entry(entry, config) {
            Ok(parsed) => parsed,
            Err(issue) => {
                document.diagnostics.push(EntryDiagnostic {
                    index,
                    name: entry_name(entry).map(str::to_string),
                    issue,
                });
                continue;
            }
        };
        if let Some(issue) = issue {
            document.diagnostics.push(EntryDiagnostic {
                index,
                name: Some(measurement.name.clone()),
                issue,
            });
        }
        let name = measurement.name.clone();
        if document.measurements.insert(name.clone(), measurement).is_some() {
            if config.duplicates == DuplicatePolicy::Reject {
                return Err(PerfGateError::malformed(
                    source,
                    format!("duplicate benchmark name {name}"),
                ));
            }
            document.diagnostics.push(EntryDiagnostic {
                index,
                name: Some(name),
                issue: EntryIssue::DuplicateName,
            });
        }
    }
    Ok(document)
}

fn parse_entry(
    entry: &Value,
    config: &LoaderConfig,
) -> Result<(Measurement, Option<EntryIssue>), EntryIssue> {
    let fields = entry.as_object().ok_or(EntryIssue::MissingName)?;
    let name = entry_name(entry).ok_or(EntryIssue::MissingName)?;

    let unit = match fields.get("time_unit") {
        None | Some(Value::Null) => None,
        Some(Value::String(unit)) => Some(unit.as_str()),
        Some(other) => {
            return Err(EntryIssue::UnknownUnit {
                unit: other.to_string(),
            });
        }
    };
    let factor = config
        .units
        .factor(unit)
        .ok_or_else(|| EntryIssue::UnknownUnit {
            unit: unit.unwrap_or_default().to_string(),
        })?;

    let (time_ns, issue) = match timing_value(fields, &config.time_fields, factor)? {
        Some(time_ns) => (time_ns, None),
        None => (0.0, Some(EntryIssue::NoTiming)),
    };

    let mut measurement = Measurement::new(name, time_ns);
    if let Some(throughput) = fields.get("items_per_second").and_then(Value::as_f64) {
        measurement = measurement.with_throughput(throughput);
    }
    if let Some(label) = fields.get("label").and_then(Value::as_str) {
        measurement = measurement.with_label(label);
    }
    Ok((measurement, issue))
}

/// First timing field present in `order`, scaled to nanoseconds by `factor`,
/// or `None` when the entry has none of them. The scaled value must stay finite.
fn timing_value(
    fields: &Map<String, Value>,
    order: &[String],
    factor: f64,
) -> Result<Option<f64>, EntryIssue> {
    let Some((field, value)) = order
        .iter()
        .find_map(|field| match fields.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some((field, value)),
        })
    else {
        return Ok(None);
    };
    match value.as_f64().map(|raw| raw * factor) {
        Some(time_ns) if time_ns.is_finite() && time_ns >= 0.0 => Ok(Some(time_ns)),
        _ => Err(EntryIssue::InvalidTime {
            field: field.clone(),
        }),
    }
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
}
