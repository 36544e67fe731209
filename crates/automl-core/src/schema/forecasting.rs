//! Document schemas of the forecasting job.
//!
//! Two layouts share one generic struct, [`ForecastingDocument`], and differ
//! only in how data inputs are written and which top-level keys are allowed:
//!
//! | | [`ForecastingJobSchema`] (standalone) | [`ForecastingNodeSchema`] (pipeline node) |
//! |---|---|---|
//! | `$schema`, `experiment_name` | allowed | rejected |
//! | data inputs | `{type, path, mode}` table | table or `${{...}}` string |
//! | `${{parent...}}` primary metric | rejected | allowed |
//!
//! Unknown keys are rejected in both layouts.  `type` must be `automl` and
//! `task` must be `forecasting`; both default to those values when omitted.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::auto::AutoOr;
use crate::domain::binding::is_data_binding_expression;
use crate::domain::featurization::FeaturizationSettings;
use crate::domain::forecasting_job::{ForecastingJob, ForecastingJobArgs};
use crate::domain::forecasting_settings::ForecastingSettings;
use crate::domain::job::{JobIdentity, JobMetadata, JobOutput, JobResources, QueueSettings};
use crate::domain::limits::LimitSettings;
use crate::domain::metric::PrimaryMetric;
use crate::domain::tabular::{DataSettings, InputMode, LogVerbosity, MlTableInput};
use crate::domain::training::TrainingSettings;
use crate::schema::{
    strip_json_nulls, DocumentFormat, DocumentMap, LoadContext, SchemaError, SchemaErrorKind,
};

const AUTOML_TYPE: &str = "automl";
const FORECASTING_TASK: &str = "forecasting";
const MLTABLE_TYPE: &str = "mltable";

// ── Schema types ──────────────────────────────────────────────────────────────

/// A data input written as a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDocument {
    #[serde(rename = "type", default = "default_input_type")]
    pub input_type: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<InputMode>,
}

/// A data input inside a pipeline node: a binding string or a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeInput {
    Binding(String),
    Input(InputDocument),
}

/// Fields shared by both document layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastingDocument<I> {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(rename = "type", default = "default_job_type")]
    pub job_type: String,
    #[serde(default = "default_task")]
    pub task: String,

    // Job metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experiment_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, JobOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<JobResources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<JobIdentity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_settings: Option<QueueSettings>,

    // Task
    #[serde(default = "default_log_verbosity")]
    pub log_verbosity: LogVerbosity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_metric: Option<String>,

    // Data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column_name: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub training_data: Option<I>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub validation_data: Option<I>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_data_size: Option<f64>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub test_data: Option<I>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_cross_validations: Option<AutoOr<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_split_column_names: Option<Vec<String>>,

    // Sub-records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featurization: Option<FeaturizationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<LimitSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training: Option<TrainingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecasting: Option<ForecastingSettings>,
}

/// Layout of a standalone job file.
pub type ForecastingJobSchema = ForecastingDocument<InputDocument>;

/// Layout of a job node inside a pipeline.
pub type ForecastingNodeSchema = ForecastingDocument<NodeInput>;

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_input_type() -> String {
    MLTABLE_TYPE.to_string()
}

fn default_job_type() -> String {
    AUTOML_TYPE.to_string()
}

fn default_task() -> String {
    FORECASTING_TASK.to_string()
}

fn default_log_verbosity() -> LogVerbosity {
    LogVerbosity::Info
}

// ── Input conversion ──────────────────────────────────────────────────────────

/// How one layout writes its data inputs.
pub trait DocumentInput: Sized {
    fn into_input(self, context: &LoadContext) -> Result<MlTableInput, SchemaErrorKind>;
    fn from_input(input: &MlTableInput) -> Self;
}

impl DocumentInput for InputDocument {
    fn into_input(self, context: &LoadContext) -> Result<MlTableInput, SchemaErrorKind> {
        if !self.input_type.eq_ignore_ascii_case(MLTABLE_TYPE) {
            return Err(SchemaErrorKind::UnexpectedValue {
                field: "type",
                value: self.input_type,
                expected: format!("'{MLTABLE_TYPE}'"),
            });
        }
        Ok(MlTableInput {
            path: resolve_path(&self.path, context),
            mode: self.mode,
        })
    }

    fn from_input(input: &MlTableInput) -> Self {
        Self {
            input_type: default_input_type(),
            path: input.path.clone(),
            mode: input.mode,
        }
    }
}

impl DocumentInput for NodeInput {
    fn into_input(self, context: &LoadContext) -> Result<MlTableInput, SchemaErrorKind> {
        match self {
            Self::Binding(expr) if is_data_binding_expression(&expr, &[]) => {
                Ok(MlTableInput::new(expr))
            }
            Self::Binding(other) => Err(SchemaErrorKind::UnexpectedValue {
                field: "input",
                value: other,
                expected: "a ${{...}} binding or an input table".to_string(),
            }),
            Self::Input(doc) => doc.into_input(context),
        }
    }

    fn from_input(input: &MlTableInput) -> Self {
        if input.is_binding() && input.mode.is_none() {
            Self::Binding(input.path.clone())
        } else {
            Self::Input(InputDocument::from_input(input))
        }
    }
}

/// Joins a relative local path onto the document's directory.
///
/// Bindings, URIs, `azureml:` references, and absolute paths are returned
/// unchanged, as is every path when the base is the current directory.
fn resolve_path(path: &str, context: &LoadContext) -> String {
    let base = context.base_path.as_path();
    let is_current_dir = base.as_os_str().is_empty() || base == Path::new(".") || base == Path::new("./");
    if is_current_dir
        || is_data_binding_expression(path, &[])
        || path.contains("://")
        || path.starts_with("azureml:")
        || Path::new(path).is_absolute()
    {
        return path.to_string();
    }

    let relative = path.strip_prefix("./").unwrap_or(path);
    base.join(relative).display().to_string()
}

// ── Document → job ────────────────────────────────────────────────────────────

impl<I: DocumentInput> ForecastingDocument<I> {
    fn into_job(self, context: &LoadContext, inside_pipeline: bool) -> Result<ForecastingJob, SchemaErrorKind> {
        if !self.job_type.eq_ignore_ascii_case(AUTOML_TYPE) {
            return Err(SchemaErrorKind::UnexpectedValue {
                field: "type",
                value: self.job_type,
                expected: format!("'{AUTOML_TYPE}'"),
            });
        }
        if !self.task.eq_ignore_ascii_case(FORECASTING_TASK) {
            return Err(SchemaErrorKind::UnexpectedValue {
                field: "task",
                value: self.task,
                expected: format!("'{FORECASTING_TASK}'"),
            });
        }
        if inside_pipeline {
            if self.schema.is_some() {
                return Err(SchemaErrorKind::UnsupportedField("$schema"));
            }
            if self.experiment_name.is_some() {
                return Err(SchemaErrorKind::UnsupportedField("experiment_name"));
            }
        }

        let metric = PrimaryMetric::parse(self.primary_metric.as_deref())?;
        if let PrimaryMetric::Deferred(expr) = &metric {
            if !inside_pipeline {
                return Err(SchemaErrorKind::DeferredMetricOutsidePipeline(expr.clone()));
            }
        }

        let target_column_name = self
            .target_column_name
            .ok_or(SchemaErrorKind::MissingField("target_column_name"))?;
        let training_data = self
            .training_data
            .ok_or(SchemaErrorKind::MissingField("training_data"))?
            .into_input(context)?;

        let data = DataSettings {
            target_column_name: Some(target_column_name),
            training_data: Some(training_data),
            validation_data: self.validation_data.map(|i| i.into_input(context)).transpose()?,
            validation_data_size: self.validation_data_size,
            weight_column_name: self.weight_column_name,
            cv_split_column_names: self.cv_split_column_names,
            n_cross_validations: self.n_cross_validations,
            test_data: self.test_data.map(|i| i.into_input(context)).transpose()?,
            test_data_size: self.test_data_size,
        };

        let job = JobMetadata {
            name: self.name,
            display_name: self.display_name,
            description: self.description,
            experiment_name: self.experiment_name,
            tags: self.tags,
            properties: self.properties,
            compute: self.compute,
            environment_id: self.environment_id,
            environment_variables: self.environment_variables,
            services: self.services,
            outputs: self.outputs,
            resources: self.resources,
            identity: self.identity,
            queue_settings: self.queue_settings,
            ..Default::default()
        };

        let mut forecasting_job = ForecastingJob::new(ForecastingJobArgs {
            primary_metric: self.primary_metric,
            forecasting_settings: self.forecasting,
            job,
            data: DataSettings::default(),
            featurization: self.featurization,
            limits: self.limits,
            training: self.training,
            log_verbosity: Some(self.log_verbosity),
        })?;
        forecasting_job.set_data(data);

        Ok(forecasting_job)
    }

    fn from_job(job: &ForecastingJob, inside_pipeline: bool) -> Self {
        let meta = &job.job;
        let data = job.data();

        Self {
            schema: None,
            job_type: default_job_type(),
            task: default_task(),
            name: meta.name.clone(),
            display_name: meta.display_name.clone(),
            description: meta.description.clone(),
            experiment_name: if inside_pipeline { None } else { meta.experiment_name.clone() },
            tags: meta.tags.clone(),
            properties: meta.properties.clone(),
            compute: meta.compute.clone(),
            environment_id: meta.environment_id.clone(),
            environment_variables: meta.environment_variables.clone(),
            services: meta.services.clone(),
            outputs: meta.outputs.clone(),
            resources: meta.resources.clone(),
            identity: meta.identity.clone(),
            queue_settings: meta.queue_settings.clone(),
            log_verbosity: job.log_verbosity(),
            primary_metric: Some(job.primary_metric().as_doc().to_string()),
            target_column_name: data.target_column_name.clone(),
            training_data: data.training_data.as_ref().map(I::from_input),
            validation_data: data.validation_data.as_ref().map(I::from_input),
            validation_data_size: data.validation_data_size,
            test_data: data.test_data.as_ref().map(I::from_input),
            test_data_size: data.test_data_size,
            weight_column_name: data.weight_column_name.clone(),
            n_cross_validations: data.n_cross_validations,
            cv_split_column_names: data.cv_split_column_names.clone(),
            featurization: job.featurization().cloned(),
            limits: job.limits().cloned(),
            training: job.training().cloned(),
            forecasting: job.forecasting_settings().cloned(),
        }
    }
}

fn load_with<I>(
    data: DocumentMap,
    context: &LoadContext,
    inside_pipeline: bool,
) -> Result<ForecastingJob, SchemaErrorKind>
where
    I: DocumentInput + for<'de> Deserialize<'de>,
{
    let document: ForecastingDocument<I> = toml::Value::Table(data)
        .try_into()
        .map_err(|e: toml::de::Error| SchemaErrorKind::Parse(e.to_string()))?;
    document.into_job(context, inside_pipeline)
}

fn dump_with<I>(job: &ForecastingJob, inside_pipeline: bool) -> Result<DocumentMap, SchemaErrorKind>
where
    I: DocumentInput + Serialize,
{
    let document = ForecastingDocument::<I>::from_job(job, inside_pipeline);
    let tree = serde_json::to_value(&document).map_err(|e| SchemaErrorKind::Serialize(e.to_string()))?;
    match toml::Value::try_from(strip_json_nulls(tree)) {
        Ok(toml::Value::Table(table)) => Ok(table),
        Ok(other) => Err(SchemaErrorKind::Serialize(format!(
            "expected a table, got {}",
            other.type_str()
        ))),
        Err(e) => Err(SchemaErrorKind::Serialize(e.to_string())),
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

impl ForecastingJob {
    /// Builds a job from a parsed document.
    ///
    /// `inside_pipeline` selects [`ForecastingNodeSchema`] instead of
    /// [`ForecastingJobSchema`].  Data-reference fields are applied through
    /// [`ForecastingJob::set_data`]; everything else goes to the constructor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] with `additional_message` attached when the
    /// document does not match the selected layout or names an unknown metric.
    pub fn load_from_dict(
        data: DocumentMap,
        context: &LoadContext,
        additional_message: &str,
        inside_pipeline: bool,
    ) -> Result<Self, SchemaError> {
        debug!(inside_pipeline, base_path = %context.base_path.display(), "loading forecasting job document");
        let result = if inside_pipeline {
            load_with::<NodeInput>(data, context, true)
        } else {
            load_with::<InputDocument>(data, context, false)
        };
        result.map_err(|kind| SchemaError::new(kind, additional_message))
    }

    /// Dumps the job as a document tree in the selected layout.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaErrorKind::DeferredMetricOutsidePipeline`] when a
    /// standalone document is requested for a job whose metric is a parent
    /// binding, or [`SchemaErrorKind::Serialize`] if a value has no TOML form.
    pub fn to_dict(&self, inside_pipeline: bool) -> Result<DocumentMap, SchemaError> {
        if !inside_pipeline {
            if let PrimaryMetric::Deferred(expr) = self.primary_metric() {
                return Err(SchemaErrorKind::DeferredMetricOutsidePipeline(expr.clone()).into());
            }
        }
        let result = if inside_pipeline {
            dump_with::<NodeInput>(self, true)
        } else {
            dump_with::<InputDocument>(self, false)
        };
        result.map_err(SchemaError::from)
    }

    pub fn from_toml_str(text: &str, context: &LoadContext, inside_pipeline: bool) -> Result<Self, SchemaError> {
        Self::from_text(DocumentFormat::Toml, text, context, inside_pipeline)
    }

    pub fn from_yaml_str(text: &str, context: &LoadContext, inside_pipeline: bool) -> Result<Self, SchemaError> {
        Self::from_text(DocumentFormat::Yaml, text, context, inside_pipeline)
    }

    pub fn to_toml_string(&self, inside_pipeline: bool) -> Result<String, SchemaError> {
        self.to_text(DocumentFormat::Toml, inside_pipeline)
    }

    pub fn to_yaml_string(&self, inside_pipeline: bool) -> Result<String, SchemaError> {
        self.to_text(DocumentFormat::Yaml, inside_pipeline)
    }

    /// Reads a `.toml`, `.yaml` or `.yml` file; relative input paths resolve
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaErrorKind::UnknownFormat`] for other extensions,
    /// [`SchemaErrorKind::Io`] if the file cannot be read, and any load error.
    pub fn load_from_path(path: &Path, inside_pipeline: bool) -> Result<Self, SchemaError> {
        Self::load_from_path_with_context(path, &LoadContext::for_file(path), inside_pipeline)
    }

    /// Like [`ForecastingJob::load_from_path`], but relative input paths
    /// resolve against `context` instead of the file's directory.
    pub fn load_from_path_with_context(
        path: &Path,
        context: &LoadContext,
        inside_pipeline: bool,
    ) -> Result<Self, SchemaError> {
        let context_message = path.display().to_string();
        let format = DocumentFormat::from_path(path)
            .map_err(|kind| SchemaError::new(kind, &context_message))?;
        let text = std::fs::read_to_string(path).map_err(|source| {
            SchemaError::from(SchemaErrorKind::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let data = format
            .parse(&text)
            .map_err(|kind| SchemaError::new(kind, &context_message))?;
        Self::load_from_dict(data, context, &context_message, inside_pipeline)
    }

    fn from_text(
        format: DocumentFormat,
        text: &str,
        context: &LoadContext,
        inside_pipeline: bool,
    ) -> Result<Self, SchemaError> {
        let data = format.parse(text)?;
        Self::load_from_dict(data, context, "", inside_pipeline)
    }

    fn to_text(&self, format: DocumentFormat, inside_pipeline: bool) -> Result<String, SchemaError> {
        let document = self.to_dict(inside_pipeline)?;
        Ok(format.render(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::ForecastingPrimaryMetric;

    const STANDALONE: &str = r#"
type = "automl"
task = "forecasting"
experiment_name = "sales"
target_column_name = "sales"
primary_metric = "R2Score"

[training_data]
type = "mltable"
path = "./train"

[forecasting]
time_column_name = "date"
forecast_horizon = 14
"#;

    #[test]
    fn test_standalone_document_loads() {
        // Act
        let job = ForecastingJob::from_toml_str(STANDALONE, &LoadContext::default(), false).unwrap();

        // Assert
        assert_eq!(job.primary_metric().concrete(), Some(ForecastingPrimaryMetric::R2Score));
        assert_eq!(job.data().target_column_name.as_deref(), Some("sales"));
        assert_eq!(job.data().training_data, Some(MlTableInput::new("./train")));
        assert_eq!(job.job.experiment_name.as_deref(), Some("sales"));
        let settings = job.forecasting_settings().unwrap();
        assert_eq!(settings.forecast_horizon, Some(AutoOr::Value(14)));
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let context = LoadContext::new("jobs/sales");

        let job = ForecastingJob::from_toml_str(STANDALONE, &context, false).unwrap();

        assert_eq!(
            job.data().training_data.as_ref().map(|d| d.path.as_str()),
            Some(Path::new("jobs/sales").join("train").display().to_string().as_str())
        );
    }

    #[test]
    fn test_remote_paths_are_not_resolved() {
        let context = LoadContext::new("/work");
        for path in [
            "azureml:sales:1",
            "azureml://datastores/blob/paths/train",
            "https://example.com/train",
            "${{parent.inputs.train}}",
        ] {
            assert_eq!(resolve_path(path, &context), path);
        }
    }

    #[test]
    fn test_node_rejects_experiment_name() {
        let err = ForecastingJob::from_toml_str(STANDALONE, &LoadContext::default(), true).unwrap_err();
        assert!(matches!(err.kind, SchemaErrorKind::UnsupportedField("experiment_name")));
    }

    #[test]
    fn test_node_accepts_binding_inputs_and_deferred_metric() {
        // Arrange
        let doc = r#"
target_column_name = "sales"
training_data = "${{parent.inputs.train}}"
primary_metric = "${{parent.inputs.metric}}"
"#;

        // Act
        let job = ForecastingJob::from_toml_str(doc, &LoadContext::new("/work"), true).unwrap();

        // Assert
        assert!(job.primary_metric().is_deferred());
        assert!(job.data().training_data.as_ref().unwrap().is_binding());
    }

    #[test]
    fn test_node_rejects_plain_string_input() {
        let doc = "target_column_name = \"sales\"\ntraining_data = \"./train\"\n";

        let err = ForecastingJob::from_toml_str(doc, &LoadContext::default(), true).unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::UnexpectedValue { field: "input", .. }));
    }

    #[test]
    fn test_standalone_rejects_deferred_metric() {
        let doc = r#"
target_column_name = "sales"
primary_metric = "${{parent.inputs.metric}}"
training_data = { path = "./train" }
"#;

        let err = ForecastingJob::from_toml_str(doc, &LoadContext::default(), false).unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::DeferredMetricOutsidePipeline(_)));
    }

    #[test]
    fn test_wrong_task_is_rejected() {
        let doc = STANDALONE.replace("task = \"forecasting\"", "task = \"regression\"");

        let err = ForecastingJob::from_toml_str(&doc, &LoadContext::default(), false).unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::UnexpectedValue { field: "task", .. }));
    }

    #[test]
    fn test_wrong_job_type_is_rejected() {
        let doc = STANDALONE.replace("type = \"automl\"", "type = \"command\"");

        let err = ForecastingJob::from_toml_str(&doc, &LoadContext::default(), false).unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::UnexpectedValue { field: "type", .. }));
    }

    #[test]
    fn test_node_rejects_schema_key() {
        let doc = r#"
"$schema" = "https://azuremlschemas.azureedge.net/latest/autoMLForecastingJob.schema.json"
target_column_name = "sales"
training_data = "${{parent.inputs.train}}"
"#;

        let err = ForecastingJob::from_toml_str(doc, &LoadContext::default(), true).unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::UnsupportedField("$schema")));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        // Top-level keys must precede the first table header.
        let doc = format!("horizon = 3\n{STANDALONE}");

        let err = ForecastingJob::from_toml_str(&doc, &LoadContext::default(), false).unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::Parse(_)));
    }

    #[test]
    fn test_missing_training_data_is_reported() {
        let err = ForecastingJob::from_toml_str(
            "target_column_name = \"sales\"",
            &LoadContext::default(),
            false,
        )
        .unwrap_err();

        assert!(matches!(err.kind, SchemaErrorKind::MissingField("training_data")));
    }

    #[test]
    fn test_additional_message_is_attached() {
        let mut data = DocumentMap::new();
        data.insert("task".to_string(), toml::Value::String("classification".to_string()));

        let err = ForecastingJob::load_from_dict(data, &LoadContext::default(), "from job.toml", false)
            .unwrap_err();

        assert!(err.to_string().ends_with("(from job.toml)"));
    }

    #[test]
    fn test_dump_writes_document_spellings() {
        // Arrange
        let job = ForecastingJob::from_toml_str(STANDALONE, &LoadContext::default(), false).unwrap();

        // Act
        let doc = job.to_dict(false).unwrap();

        // Assert
        assert_eq!(doc["type"].as_str(), Some("automl"));
        assert_eq!(doc["task"].as_str(), Some("forecasting"));
        assert_eq!(doc["primary_metric"].as_str(), Some("r2_score"));
        assert_eq!(doc["log_verbosity"].as_str(), Some("info"));
        assert_eq!(doc["training_data"]["type"].as_str(), Some("mltable"));
    }

    #[test]
    fn test_node_dump_omits_experiment_name_and_writes_bindings() {
        let mut job = ForecastingJob::from_toml_str(STANDALONE, &LoadContext::default(), false).unwrap();
        job.set_data(DataSettings {
            training_data: Some(MlTableInput::new("${{parent.inputs.train}}")),
            ..Default::default()
        });

        let doc = job.to_dict(true).unwrap();

        assert!(doc.get("experiment_name").is_none());
        assert_eq!(doc["training_data"].as_str(), Some("${{parent.inputs.train}}"));
    }

    #[test]
    fn test_standalone_dump_rejects_deferred_metric() {
        let mut job = ForecastingJob::from_toml_str(STANDALONE, &LoadContext::default(), false).unwrap();
        job.set_primary_metric(Some("${{parent.inputs.metric}}")).unwrap();

        assert!(job.to_dict(false).is_err());
        assert!(job.to_dict(true).is_ok());
    }
}
