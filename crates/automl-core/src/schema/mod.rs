//! Declarative job documents (TOML and YAML).
//!
//! A job document is the file a user writes by hand to describe a job:
//!
//! ```yaml
//! type: automl
//! task: forecasting
//! target_column_name: sales
//! training_data:
//!   type: mltable
//!   path: ./train
//! primary_metric: normalized_root_mean_squared_error
//! forecasting:
//!   time_column_name: date
//!   forecast_horizon: 14
//! ```
//!
//! Both formats are first parsed into a [`DocumentMap`] (a TOML table), so
//! the schema layer only ever sees one tree type.  YAML `null` values are
//! dropped on the way in because TOML has no null.
//!
//! # Standalone vs pipeline node
//!
//! The same job can be written as a file of its own or as a node inside a
//! pipeline.  The two layouts differ slightly; see
//! [`forecasting`](crate::schema::forecasting) for the details.  Callers pick
//! one with the `inside_pipeline` flag.

pub mod forecasting;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::metric::MetricError;

pub use forecasting::{ForecastingJobSchema, ForecastingNodeSchema};

/// In-memory tree of a job document.
pub type DocumentMap = toml::Table;

// ── Error type ────────────────────────────────────────────────────────────────

/// What went wrong while loading or dumping a document.
#[derive(Debug, Error)]
pub enum SchemaErrorKind {
    /// The text or tree does not match the schema (syntax, types, unknown keys).
    #[error("invalid job document: {0}")]
    Parse(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The field exists in another layout but not in this one.
    #[error("field '{0}' is not allowed here")]
    UnsupportedField(&'static str),

    #[error("invalid value '{value}' for '{field}': expected {expected}")]
    UnexpectedValue {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("primary metric '{0}' binds to a parent pipeline but the job is not a pipeline node")]
    DeferredMetricOutsidePipeline(String),

    #[error(transparent)]
    InvalidMetric(#[from] MetricError),

    #[error("failed to serialize job document: {0}")]
    Serialize(String),

    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown document format for {0}: expected .toml, .yaml or .yml")]
    UnknownFormat(PathBuf),
}

/// A document failure plus optional caller-supplied context.
#[derive(Debug, Error)]
#[error("{kind}{}", with_context(.additional_message))]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    /// Appended to the message; empty when the caller gave none.
    pub additional_message: String,
}

impl SchemaError {
    pub fn new(kind: SchemaErrorKind, additional_message: &str) -> Self {
        Self {
            kind,
            additional_message: additional_message.to_string(),
        }
    }
}

impl From<SchemaErrorKind> for SchemaError {
    fn from(kind: SchemaErrorKind) -> Self {
        Self::new(kind, "")
    }
}

fn with_context(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({message})")
    }
}

// ── Load context ──────────────────────────────────────────────────────────────

/// Where a document came from, used to resolve relative paths inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    /// Directory relative input paths are resolved against.
    pub base_path: PathBuf,
}

impl Default for LoadContext {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
        }
    }
}

impl LoadContext {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Context for a document stored at `file`: its parent directory.
    pub fn for_file(file: &Path) -> Self {
        match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Self::new(parent),
            _ => Self::default(),
        }
    }
}

// ── Text formats ──────────────────────────────────────────────────────────────

/// Document text formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, SchemaErrorKind> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(SchemaErrorKind::UnknownFormat(path.to_path_buf())),
        }
    }

    /// Parses document text into a [`DocumentMap`].
    pub fn parse(self, text: &str) -> Result<DocumentMap, SchemaErrorKind> {
        match self {
            Self::Toml => toml::from_str(text).map_err(|e| SchemaErrorKind::Parse(e.to_string())),
            Self::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_str(text)
                    .map_err(|e| SchemaErrorKind::Parse(e.to_string()))?;
                let value = strip_yaml_nulls(value);
                if value.is_null() {
                    return Ok(DocumentMap::new());
                }
                serde_yaml::from_value(value).map_err(|e| SchemaErrorKind::Parse(e.to_string()))
            }
        }
    }

    /// Renders a [`DocumentMap`] as text.
    pub fn render(self, document: &DocumentMap) -> Result<String, SchemaErrorKind> {
        match self {
            Self::Toml => {
                toml::to_string(document).map_err(|e| SchemaErrorKind::Serialize(e.to_string()))
            }
            Self::Yaml => serde_yaml::to_string(document)
                .map_err(|e| SchemaErrorKind::Serialize(e.to_string())),
        }
    }
}

/// Removes `null` mapping entries and sequence items, recursively.
fn strip_yaml_nulls(value: serde_yaml::Value) -> serde_yaml::Value {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_yaml_nulls(v)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_yaml_nulls)
                .collect(),
        ),
        Value::Tagged(tagged) => strip_yaml_nulls(tagged.value),
        other => other,
    }
}

/// Removes `null` object entries and array items, recursively.
///
/// Free-form JSON fields (service endpoints, meta-learner kwargs, transformer
/// parameters) may carry nulls that have no TOML form.
pub(crate) fn strip_json_nulls(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_json_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_json_nulls)
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_appends_context() {
        let err = SchemaError::new(SchemaErrorKind::MissingField("training_data"), "job.yml");
        assert_eq!(err.to_string(), "missing required field 'training_data' (job.yml)");

        let bare: SchemaError = SchemaErrorKind::MissingField("task").into();
        assert_eq!(bare.to_string(), "missing required field 'task'");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a/job.TOML")).unwrap(), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_path(Path::new("job.yml")).unwrap(), DocumentFormat::Yaml);
        assert!(matches!(
            DocumentFormat::from_path(Path::new("job.json")),
            Err(SchemaErrorKind::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_yaml_nulls_are_dropped() {
        // Arrange
        let text = "name: demo\ndescription: null\ntags:\n  team: ml\n  owner: ~\n";

        // Act
        let doc = DocumentFormat::Yaml.parse(text).unwrap();

        // Assert
        assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("demo"));
        assert!(doc.get("description").is_none());
        let tags = doc.get("tags").and_then(|v| v.as_table()).unwrap();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_json_nulls_are_dropped() {
        let value = serde_json::json!({
            "endpoint": "https://tracking",
            "port": null,
            "nested": {"status": null, "items": [1, null, 2]},
        });

        let stripped = strip_json_nulls(value);

        assert_eq!(
            stripped,
            serde_json::json!({"endpoint": "https://tracking", "nested": {"items": [1, 2]}})
        );
    }

    #[test]
    fn test_empty_yaml_is_empty_document() {
        assert!(DocumentFormat::Yaml.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_context_for_file_uses_parent_directory() {
        assert_eq!(
            LoadContext::for_file(Path::new("jobs/sales/job.yml")).base_path,
            PathBuf::from("jobs/sales")
        );
        assert_eq!(LoadContext::for_file(Path::new("job.yml")), LoadContext::default());
    }
}
