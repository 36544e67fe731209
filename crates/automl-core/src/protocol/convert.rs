//! Translation between the domain records and the REST wire model.
//!
//! # Direction and failure (for beginners)
//!
//! ```text
//! ForecastingJob ──to_rest_object()──▶ RestJobBase        (cannot fail)
//! RestJobBase ──from_rest_object()──▶ ForecastingJob      (may fail)
//! ```
//!
//! Going to the wire never fails: every domain value has a wire spelling.
//! Coming back can fail because the service payload is untyped text: an
//! unknown enumeration value, a malformed ISO-8601 duration, or a payload for
//! a different job or task type are all reported as [`ConversionError`].
//!
//! Each sub-record has its own `From<&Domain> for Rest*` and
//! `TryFrom<Rest*> for Domain` pair; the job-level functions only stitch them
//! together.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::domain::auto::{AutoOr, TargetLags};
use crate::domain::enums::ParseEnumError;
use crate::domain::featurization::{ColumnTransformer, FeaturizationSettings};
use crate::domain::forecasting_job::{ForecastingJob, ForecastingJobArgs};
use crate::domain::forecasting_settings::ForecastingSettings;
use crate::domain::job::{
    CreationContext, JobIdentity, JobMetadata, JobOutput, JobResources, QueueSettings,
};
use crate::domain::limits::LimitSettings;
use crate::domain::metric::MetricError;
use crate::domain::tabular::{DataSettings, MlTableInput};
use crate::domain::training::{StackEnsembleSettings, TrainingSettings};
use crate::protocol::duration::{self, DurationError};
use crate::protocol::rest::{
    RestAutoMlJob, RestColumnTransformer, RestFeaturizationSettings, RestForecasting,
    RestForecastingSettings, RestIdentity, RestJobBase, RestJobOutput, RestJobResources,
    RestLimitSettings, RestMlTableJobInput, RestModeValue, RestQueueSettings,
    RestStackEnsembleSettings, RestSystemData, RestTargetLags, RestTrainingSettings,
    AUTOML_JOB_TYPE, MLTABLE_INPUT_TYPE,
};

// ── Error type ────────────────────────────────────────────────────────────────

/// Errors raised while rebuilding a job from its wire representation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConversionError {
    #[error("unexpected job type '{0}': expected '{}'", AUTOML_JOB_TYPE)]
    UnexpectedJobType(String),

    #[error("unexpected task type '{0}': expected '{}'", ForecastingJob::TASK_TYPE)]
    UnexpectedTaskType(String),

    #[error("unexpected input type '{0}': expected '{}'", MLTABLE_INPUT_TYPE)]
    UnexpectedInputType(String),

    #[error(transparent)]
    InvalidEnum(#[from] ParseEnumError),

    #[error(transparent)]
    InvalidMetric(#[from] MetricError),

    #[error(transparent)]
    InvalidDuration(#[from] DurationError),

    /// A value is well-formed JSON but out of range for its field.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ── Job level ─────────────────────────────────────────────────────────────────

impl ForecastingJob {
    /// Builds the REST payload for this job.
    pub fn to_rest_object(&self) -> RestJobBase {
        let job = &self.job;
        let data = self.data();

        let task_details = RestForecasting {
            task_type: Self::TASK_TYPE.to_string(),
            target_column_name: data.target_column_name.clone(),
            training_data: data.training_data.as_ref().map(mltable_to_rest),
            validation_data: validation_data_to_rest(data.validation_data.as_ref()),
            validation_data_size: data.validation_data_size,
            test_data: data.test_data.as_ref().map(mltable_to_rest),
            test_data_size: data.test_data_size,
            weight_column_name: data.weight_column_name.clone(),
            cv_split_column_names: data.cv_split_column_names.clone(),
            n_cross_validations: data.n_cross_validations.map(mode_value_to_rest),
            featurization_settings: self.featurization().map(RestFeaturizationSettings::from),
            limit_settings: self.limits().map(RestLimitSettings::from),
            training_settings: self.training().map(RestTrainingSettings::from),
            primary_metric: Some(self.primary_metric().as_wire().to_string()),
            log_verbosity: Some(self.log_verbosity().as_wire().to_string()),
            forecasting_settings: self.forecasting_settings().map(RestForecastingSettings::from),
        };

        let properties = RestAutoMlJob {
            job_type: AUTOML_JOB_TYPE.to_string(),
            display_name: job.display_name.clone(),
            description: job.description.clone(),
            experiment_name: job.experiment_name.clone(),
            tags: job.tags.clone(),
            properties: job.properties.clone(),
            compute_id: job.compute.clone(),
            environment_id: job.environment_id.clone(),
            environment_variables: job.environment_variables.clone(),
            services: job.services.clone(),
            outputs: job
                .outputs
                .iter()
                .map(|(name, output)| (name.clone(), Some(RestJobOutput::from(output))))
                .collect(),
            resources: job.resources.as_ref().map(RestJobResources::from),
            task_details,
            identity: job.identity.as_ref().map(RestIdentity::from),
            queue_settings: job.queue_settings.as_ref().map(RestQueueSettings::from),
            status: None,
        };

        RestJobBase {
            id: job.id.clone(),
            name: job.name.clone(),
            resource_type: None,
            properties,
            system_data: None,
        }
    }

    /// Rebuilds a job from a REST payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] if the payload is not an AutoML forecasting
    /// job, or if any enumeration, metric, duration, or identity value cannot
    /// be parsed.
    pub fn from_rest_object(rest: RestJobBase) -> Result<Self, ConversionError> {
        let RestJobBase {
            id,
            name,
            properties,
            system_data,
            ..
        } = rest;

        if properties.job_type != AUTOML_JOB_TYPE {
            return Err(ConversionError::UnexpectedJobType(properties.job_type));
        }
        let task = properties.task_details;
        if task.task_type != Self::TASK_TYPE {
            return Err(ConversionError::UnexpectedTaskType(task.task_type));
        }

        let mut outputs = BTreeMap::new();
        for (key, output) in properties.outputs {
            match output {
                Some(output) => {
                    outputs.insert(key, JobOutput::try_from(output)?);
                }
                None => debug!(output = %key, "skipping unresolved job output"),
            }
        }

        let job = JobMetadata {
            name,
            display_name: properties.display_name,
            description: properties.description,
            experiment_name: properties.experiment_name,
            tags: properties.tags,
            properties: properties.properties,
            compute: properties.compute_id,
            environment_id: properties.environment_id,
            environment_variables: properties.environment_variables,
            services: properties.services,
            outputs,
            resources: properties.resources.map(JobResources::from),
            identity: properties.identity.map(JobIdentity::try_from).transpose()?,
            queue_settings: properties.queue_settings.map(QueueSettings::try_from).transpose()?,
            id,
            status: properties.status,
            creation_context: system_data.map(CreationContext::from),
        };

        let mut forecasting_job = Self::new(ForecastingJobArgs {
            primary_metric: task.primary_metric,
            forecasting_settings: task
                .forecasting_settings
                .map(ForecastingSettings::try_from)
                .transpose()?,
            job,
            data: DataSettings::default(),
            featurization: task
                .featurization_settings
                .map(FeaturizationSettings::try_from)
                .transpose()?,
            limits: task.limit_settings.map(LimitSettings::try_from).transpose()?,
            training: task.training_settings.map(TrainingSettings::try_from).transpose()?,
            log_verbosity: parse_opt(task.log_verbosity)?,
        })?;

        forecasting_job.set_data(DataSettings {
            target_column_name: task.target_column_name,
            training_data: task.training_data.map(mltable_from_rest).transpose()?,
            validation_data: validation_data_from_rest(task.validation_data)?,
            validation_data_size: task.validation_data_size,
            weight_column_name: task.weight_column_name,
            cv_split_column_names: task.cv_split_column_names,
            n_cross_validations: task
                .n_cross_validations
                .map(|v| mode_value_from_rest(v, "nCrossValidations"))
                .transpose()?,
            test_data: task.test_data.map(mltable_from_rest).transpose()?,
            test_data_size: task.test_data_size,
        });

        Ok(forecasting_job)
    }
}

// ── Helpers: scalars ──────────────────────────────────────────────────────────

/// Parses an optional wire enumeration value.
fn parse_opt<T>(value: Option<String>) -> Result<Option<T>, ConversionError>
where
    T: FromStr<Err = ParseEnumError>,
{
    value
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(ConversionError::from)
}

fn mode_value_to_rest(value: AutoOr<u32>) -> RestModeValue {
    match value {
        AutoOr::Auto => RestModeValue::Auto,
        AutoOr::Value(v) => RestModeValue::Custom { value: i64::from(v) },
    }
}

fn mode_value_from_rest(
    value: RestModeValue,
    field: &'static str,
) -> Result<AutoOr<u32>, ConversionError> {
    match value {
        RestModeValue::Auto => Ok(AutoOr::Auto),
        RestModeValue::Custom { value } => to_u32(value, field).map(AutoOr::Value),
    }
}

fn to_u32(value: i64, field: &'static str) -> Result<u32, ConversionError> {
    u32::try_from(value).map_err(|_| ConversionError::InvalidValue {
        field,
        reason: format!("{value} is not a non-negative 32-bit integer"),
    })
}

fn to_i32(value: i64, field: &'static str) -> Result<i32, ConversionError> {
    i32::try_from(value).map_err(|_| ConversionError::InvalidValue {
        field,
        reason: format!("{value} does not fit a 32-bit integer"),
    })
}

// ── Helpers: data inputs ──────────────────────────────────────────────────────

fn mltable_to_rest(input: &MlTableInput) -> RestMlTableJobInput {
    RestMlTableJobInput {
        job_input_type: MLTABLE_INPUT_TYPE.to_string(),
        uri: input.path.clone(),
        mode: input.mode.map(|m| m.as_wire().to_string()),
        description: None,
    }
}

fn mltable_from_rest(input: RestMlTableJobInput) -> Result<MlTableInput, ConversionError> {
    if !input.job_input_type.eq_ignore_ascii_case(MLTABLE_INPUT_TYPE) {
        return Err(ConversionError::UnexpectedInputType(input.job_input_type));
    }
    Ok(MlTableInput {
        path: input.uri,
        mode: parse_opt(input.mode)?,
    })
}

/// Validation data is optional on the wire; an input without a path is omitted.
fn validation_data_to_rest(input: Option<&MlTableInput>) -> Option<RestMlTableJobInput> {
    input
        .filter(|input| !input.path.trim().is_empty())
        .map(mltable_to_rest)
}

fn validation_data_from_rest(
    input: Option<RestMlTableJobInput>,
) -> Result<Option<MlTableInput>, ConversionError> {
    match input {
        Some(input) if input.uri.trim().is_empty() => Ok(None),
        Some(input) => mltable_from_rest(input).map(Some),
        None => Ok(None),
    }
}

// ── Forecasting settings ──────────────────────────────────────────────────────

impl From<&ForecastingSettings> for RestForecastingSettings {
    fn from(s: &ForecastingSettings) -> Self {
        Self {
            country_or_region_for_holidays: s.country_or_region_for_holidays.clone(),
            cv_step_size: s.cv_step_size.map(i64::from),
            feature_lags: s.feature_lags.map(|v| v.as_wire().to_string()),
            features_unknown_at_forecast_time: s.features_unknown_at_forecast_time.clone(),
            forecast_horizon: s.forecast_horizon.map(mode_value_to_rest),
            frequency: s.frequency.clone(),
            seasonality: s.seasonality.map(mode_value_to_rest),
            short_series_handling_config: s
                .short_series_handling_config
                .map(|v| v.as_wire().to_string()),
            target_aggregate_function: s.target_aggregate_function.map(|v| v.as_wire().to_string()),
            target_lags: s.target_lags.as_ref().map(|lags| match lags {
                TargetLags::Auto => RestTargetLags::Auto,
                TargetLags::Values(values) => RestTargetLags::Custom {
                    values: values.clone(),
                },
            }),
            target_rolling_window_size: s.target_rolling_window_size.map(mode_value_to_rest),
            time_column_name: s.time_column_name.clone(),
            time_series_id_column_names: s.time_series_id_column_names.clone(),
            use_stl: s.use_stl.map(|v| v.as_wire().to_string()),
        }
    }
}

impl TryFrom<RestForecastingSettings> for ForecastingSettings {
    type Error = ConversionError;

    fn try_from(s: RestForecastingSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            time_column_name: s.time_column_name,
            forecast_horizon: s
                .forecast_horizon
                .map(|v| mode_value_from_rest(v, "forecastHorizon"))
                .transpose()?,
            time_series_id_column_names: s.time_series_id_column_names,
            target_lags: s.target_lags.map(|lags| match lags {
                RestTargetLags::Auto => TargetLags::Auto,
                RestTargetLags::Custom { values } => TargetLags::Values(values),
            }),
            feature_lags: parse_opt(s.feature_lags)?,
            target_rolling_window_size: s
                .target_rolling_window_size
                .map(|v| mode_value_from_rest(v, "targetRollingWindowSize"))
                .transpose()?,
            country_or_region_for_holidays: s.country_or_region_for_holidays,
            use_stl: parse_opt(s.use_stl)?,
            seasonality: s
                .seasonality
                .map(|v| mode_value_from_rest(v, "seasonality"))
                .transpose()?,
            short_series_handling_config: parse_opt(s.short_series_handling_config)?,
            frequency: s.frequency,
            target_aggregate_function: parse_opt(s.target_aggregate_function)?,
            cv_step_size: s.cv_step_size.map(|v| to_u32(v, "cvStepSize")).transpose()?,
            features_unknown_at_forecast_time: s.features_unknown_at_forecast_time,
        })
    }
}

// ── Training settings ─────────────────────────────────────────────────────────

impl From<&TrainingSettings> for RestTrainingSettings {
    fn from(t: &TrainingSettings) -> Self {
        Self {
            enable_onnx_compatible_models: t.enable_onnx_compatible_models,
            enable_dnn_training: t.enable_dnn_training,
            enable_model_explainability: t.enable_model_explainability,
            enable_stack_ensemble: t.enable_stack_ensemble,
            enable_vote_ensemble: t.enable_vote_ensemble,
            stack_ensemble_settings: t.stack_ensemble_settings.as_ref().map(|s| {
                RestStackEnsembleSettings {
                    stack_meta_learner_type: s
                        .stack_meta_learner_type
                        .map(|v| v.as_wire().to_string()),
                    stack_meta_learner_train_percentage: s.stack_meta_learner_train_percentage,
                    stack_meta_learner_kwargs: s.stack_meta_learner_kwargs.clone(),
                }
            }),
            ensemble_model_download_timeout: t
                .ensemble_model_download_timeout
                .map(duration::format_seconds),
            allowed_training_algorithms: t.allowed_training_algorithms.clone(),
            blocked_training_algorithms: t.blocked_training_algorithms.clone(),
            training_mode: t.training_mode.map(|v| v.as_wire().to_string()),
        }
    }
}

impl TryFrom<RestTrainingSettings> for TrainingSettings {
    type Error = ConversionError;

    fn try_from(t: RestTrainingSettings) -> Result<Self, Self::Error> {
        let stack_ensemble_settings = match t.stack_ensemble_settings {
            Some(s) => Some(StackEnsembleSettings {
                stack_meta_learner_type: parse_opt(s.stack_meta_learner_type)?,
                stack_meta_learner_train_percentage: s.stack_meta_learner_train_percentage,
                stack_meta_learner_kwargs: s.stack_meta_learner_kwargs,
            }),
            None => None,
        };

        Ok(Self {
            enable_onnx_compatible_models: t.enable_onnx_compatible_models,
            enable_dnn_training: t.enable_dnn_training,
            enable_model_explainability: t.enable_model_explainability,
            enable_stack_ensemble: t.enable_stack_ensemble,
            enable_vote_ensemble: t.enable_vote_ensemble,
            stack_ensemble_settings,
            ensemble_model_download_timeout: t
                .ensemble_model_download_timeout
                .as_deref()
                .map(duration::parse_seconds)
                .transpose()?,
            allowed_training_algorithms: t.allowed_training_algorithms,
            blocked_training_algorithms: t.blocked_training_algorithms,
            training_mode: parse_opt(t.training_mode)?,
        })
    }
}

// ── Limit settings ────────────────────────────────────────────────────────────

impl From<&LimitSettings> for RestLimitSettings {
    fn from(l: &LimitSettings) -> Self {
        Self {
            enable_early_termination: l.enable_early_termination,
            exit_score: l.exit_score,
            max_concurrent_trials: l.max_concurrent_trials.map(i64::from),
            max_cores_per_trial: l.max_cores_per_trial.map(i64::from),
            max_nodes: l.max_nodes.map(i64::from),
            max_trials: l.max_trials.map(i64::from),
            timeout: l.timeout_minutes.map(duration::format_minutes),
            trial_timeout: l.trial_timeout_minutes.map(duration::format_minutes),
        }
    }
}

impl TryFrom<RestLimitSettings> for LimitSettings {
    type Error = ConversionError;

    fn try_from(l: RestLimitSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            enable_early_termination: l.enable_early_termination,
            exit_score: l.exit_score,
            max_concurrent_trials: l
                .max_concurrent_trials
                .map(|v| to_u32(v, "maxConcurrentTrials"))
                .transpose()?,
            max_cores_per_trial: l
                .max_cores_per_trial
                .map(|v| to_i32(v, "maxCoresPerTrial"))
                .transpose()?,
            max_nodes: l.max_nodes.map(|v| to_u32(v, "maxNodes")).transpose()?,
            max_trials: l.max_trials.map(|v| to_u32(v, "maxTrials")).transpose()?,
            timeout_minutes: l.timeout.as_deref().map(duration::parse_minutes).transpose()?,
            trial_timeout_minutes: l
                .trial_timeout
                .as_deref()
                .map(duration::parse_minutes)
                .transpose()?,
        })
    }
}

// ── Featurization settings ────────────────────────────────────────────────────

impl From<&FeaturizationSettings> for RestFeaturizationSettings {
    fn from(f: &FeaturizationSettings) -> Self {
        Self {
            mode: f.mode.map(|v| v.as_wire().to_string()),
            blocked_transformers: f.blocked_transformers.clone(),
            column_name_and_types: f.column_name_and_types.clone(),
            dataset_language: f.dataset_language.clone(),
            transformer_params: f.transformer_params.as_ref().map(|params| {
                params
                    .iter()
                    .map(|(name, transformers)| {
                        let rest = transformers
                            .iter()
                            .map(|t| RestColumnTransformer {
                                fields: t.fields.clone(),
                                parameters: t.parameters.clone(),
                            })
                            .collect();
                        (name.clone(), rest)
                    })
                    .collect()
            }),
            enable_dnn_featurization: f.enable_dnn_featurization,
        }
    }
}

impl TryFrom<RestFeaturizationSettings> for FeaturizationSettings {
    type Error = ConversionError;

    fn try_from(f: RestFeaturizationSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            mode: parse_opt(f.mode)?,
            blocked_transformers: f.blocked_transformers,
            column_name_and_types: f.column_name_and_types,
            dataset_language: f.dataset_language,
            transformer_params: f.transformer_params.map(|params| {
                params
                    .into_iter()
                    .map(|(name, transformers)| {
                        let domain = transformers
                            .into_iter()
                            .map(|t| ColumnTransformer {
                                fields: t.fields,
                                parameters: t.parameters,
                            })
                            .collect();
                        (name, domain)
                    })
                    .collect()
            }),
            enable_dnn_featurization: f.enable_dnn_featurization,
        })
    }
}

// ── Job-level records ─────────────────────────────────────────────────────────

impl From<&JobOutput> for RestJobOutput {
    fn from(o: &JobOutput) -> Self {
        Self {
            job_output_type: o.output_type.as_wire().to_string(),
            uri: o.path.clone(),
            mode: o.mode.map(|m| m.as_wire().to_string()),
            description: o.description.clone(),
        }
    }
}

impl TryFrom<RestJobOutput> for JobOutput {
    type Error = ConversionError;

    fn try_from(o: RestJobOutput) -> Result<Self, Self::Error> {
        Ok(Self {
            output_type: o.job_output_type.parse()?,
            path: o.uri,
            mode: parse_opt(o.mode)?,
            description: o.description,
        })
    }
}

impl From<&JobResources> for RestJobResources {
    fn from(r: &JobResources) -> Self {
        Self {
            instance_count: r.instance_count,
            instance_type: r.instance_type.clone(),
            shm_size: r.shm_size.clone(),
            docker_args: r.docker_args.clone(),
        }
    }
}

impl From<RestJobResources> for JobResources {
    fn from(r: RestJobResources) -> Self {
        Self {
            instance_count: r.instance_count,
            instance_type: r.instance_type,
            shm_size: r.shm_size,
            docker_args: r.docker_args,
        }
    }
}

impl From<&QueueSettings> for RestQueueSettings {
    fn from(q: &QueueSettings) -> Self {
        Self {
            job_tier: q.job_tier.map(|t| t.as_wire().to_string()),
            priority: q.priority,
        }
    }
}

impl TryFrom<RestQueueSettings> for QueueSettings {
    type Error = ConversionError;

    fn try_from(q: RestQueueSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            job_tier: parse_opt(q.job_tier)?,
            priority: q.priority,
        })
    }
}

impl From<&JobIdentity> for RestIdentity {
    fn from(identity: &JobIdentity) -> Self {
        match identity {
            JobIdentity::AmlToken => Self::AmlToken,
            JobIdentity::UserIdentity => Self::UserIdentity,
            JobIdentity::Managed {
                client_id,
                object_id,
                resource_id,
            } => Self::Managed {
                client_id: client_id.map(|id| id.to_string()),
                object_id: object_id.map(|id| id.to_string()),
                resource_id: resource_id.clone(),
            },
        }
    }
}

impl TryFrom<RestIdentity> for JobIdentity {
    type Error = ConversionError;

    fn try_from(identity: RestIdentity) -> Result<Self, Self::Error> {
        Ok(match identity {
            RestIdentity::AmlToken => Self::AmlToken,
            RestIdentity::UserIdentity => Self::UserIdentity,
            RestIdentity::Managed {
                client_id,
                object_id,
                resource_id,
            } => Self::Managed {
                client_id: client_id.map(|id| parse_uuid(&id, "clientId")).transpose()?,
                object_id: object_id.map(|id| parse_uuid(&id, "objectId")).transpose()?,
                resource_id,
            },
        })
    }
}

fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, ConversionError> {
    Uuid::parse_str(value).map_err(|e| ConversionError::InvalidValue {
        field,
        reason: e.to_string(),
    })
}

impl From<RestSystemData> for CreationContext {
    fn from(s: RestSystemData) -> Self {
        Self {
            created_at: s.created_at,
            created_by: s.created_by,
            created_by_type: s.created_by_type,
            last_modified_at: s.last_modified_at,
            last_modified_by: s.last_modified_by,
            last_modified_by_type: s.last_modified_by_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecasting_settings::{ShortSeriesHandling, UseStl};
    use crate::domain::metric::{ForecastingPrimaryMetric, PrimaryMetric};
    use crate::domain::tabular::InputMode;
    use crate::domain::training::{StackMetaLearnerType, TrainingMode};

    fn sample_job() -> ForecastingJob {
        let mut job = ForecastingJob::new(ForecastingJobArgs {
            primary_metric: Some("r2_score".to_string()),
            data: DataSettings {
                target_column_name: Some("sales".to_string()),
                training_data: Some(MlTableInput::new("azureml:sales-train:1")),
                n_cross_validations: Some(AutoOr::Value(5)),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();
        job.job.name = Some("sales-forecast".to_string());
        job.job.compute = Some("cpu-cluster".to_string());
        job
    }

    // ── to_rest_object ────────────────────────────────────────────────────────

    #[test]
    fn test_to_rest_sets_discriminators() {
        let rest = sample_job().to_rest_object();

        assert_eq!(rest.properties.job_type, "AutoML");
        assert_eq!(rest.properties.task_details.task_type, "Forecasting");
        assert_eq!(rest.name.as_deref(), Some("sales-forecast"));
        assert_eq!(rest.properties.compute_id.as_deref(), Some("cpu-cluster"));
    }

    #[test]
    fn test_to_rest_uses_wire_spellings() {
        // Arrange
        let mut job = sample_job();
        job.set_forecast_settings(crate::domain::ForecastSettingsUpdate {
            use_stl: Some(UseStl::SeasonTrend),
            short_series_handling_config: Some(ShortSeriesHandling::Pad),
            seasonality: Some(AutoOr::Auto),
            ..Default::default()
        });

        // Act
        let task = job.to_rest_object().properties.task_details;

        // Assert
        assert_eq!(task.primary_metric.as_deref(), Some("R2Score"));
        assert_eq!(task.log_verbosity.as_deref(), Some("Info"));
        assert_eq!(task.n_cross_validations, Some(RestModeValue::Custom { value: 5 }));
        let settings = task.forecasting_settings.unwrap();
        assert_eq!(settings.use_stl.as_deref(), Some("SeasonTrend"));
        assert_eq!(settings.short_series_handling_config.as_deref(), Some("Pad"));
        assert_eq!(settings.seasonality, Some(RestModeValue::Auto));
    }

    #[test]
    fn test_to_rest_omits_absent_forecasting_settings() {
        let task = sample_job().to_rest_object().properties.task_details;
        assert!(task.forecasting_settings.is_none());
        assert!(task.training_settings.is_none());
    }

    #[test]
    fn test_validation_data_without_path_is_dropped() {
        let mut job = sample_job();
        job.set_data(DataSettings {
            validation_data: Some(MlTableInput::new("")),
            ..Default::default()
        });

        let task = job.to_rest_object().properties.task_details;

        assert!(task.validation_data.is_none());
    }

    #[test]
    fn test_durations_are_iso8601() {
        let mut job = sample_job();
        job.set_limits(LimitSettings {
            timeout_minutes: Some(360),
            trial_timeout_minutes: Some(20),
            ..Default::default()
        });
        job.set_training(crate::domain::training::TrainingUpdate {
            ensemble_model_download_timeout: Some(300),
            ..Default::default()
        });

        let task = job.to_rest_object().properties.task_details;

        let limits = task.limit_settings.unwrap();
        assert_eq!(limits.timeout.as_deref(), Some("PT6H"));
        assert_eq!(limits.trial_timeout.as_deref(), Some("PT20M"));
        let training = task.training_settings.unwrap();
        assert_eq!(training.ensemble_model_download_timeout.as_deref(), Some("PT5M"));
        assert_eq!(training.enable_stack_ensemble, Some(false));
    }

    // ── from_rest_object ──────────────────────────────────────────────────────

    #[test]
    fn test_round_trip_preserves_equality() {
        // Arrange
        let mut job = sample_job();
        job.set_forecast_settings(crate::domain::ForecastSettingsUpdate {
            time_column_name: Some("date".to_string()),
            target_lags: Some(TargetLags::Values(vec![1, 7])),
            cv_step_size: Some(3),
            ..Default::default()
        });
        job.set_training(crate::domain::training::TrainingUpdate {
            training_mode: Some(TrainingMode::NonDistributed),
            stack_ensemble_settings: Some(StackEnsembleSettings {
                stack_meta_learner_type: Some(StackMetaLearnerType::LightGbmRegressor),
                ..Default::default()
            }),
            ..Default::default()
        });

        // Act
        let back = ForecastingJob::from_rest_object(job.to_rest_object()).unwrap();

        // Assert
        assert_eq!(back, job);
        assert_eq!(back.job.name.as_deref(), Some("sales-forecast"));
    }

    #[test]
    fn test_from_rest_rejects_wrong_task_type() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.task_details.task_type = "Regression".to_string();

        let err = ForecastingJob::from_rest_object(rest).unwrap_err();

        assert_eq!(err, ConversionError::UnexpectedTaskType("Regression".to_string()));
    }

    #[test]
    fn test_from_rest_rejects_wrong_job_type() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.job_type = "Command".to_string();

        assert!(matches!(
            ForecastingJob::from_rest_object(rest),
            Err(ConversionError::UnexpectedJobType(_))
        ));
    }

    #[test]
    fn test_from_rest_rejects_unknown_metric() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.task_details.primary_metric = Some("Accuracy".to_string());

        assert!(matches!(
            ForecastingJob::from_rest_object(rest),
            Err(ConversionError::InvalidMetric(_))
        ));
    }

    #[test]
    fn test_from_rest_missing_metric_uses_default() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.task_details.primary_metric = None;

        let job = ForecastingJob::from_rest_object(rest).unwrap();

        assert_eq!(
            job.primary_metric(),
            &PrimaryMetric::Concrete(ForecastingPrimaryMetric::DEFAULT)
        );
    }

    #[test]
    fn test_from_rest_rejects_bad_duration() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.task_details.limit_settings = Some(RestLimitSettings {
            timeout: Some("P1Y".to_string()),
            ..Default::default()
        });

        assert!(matches!(
            ForecastingJob::from_rest_object(rest),
            Err(ConversionError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_from_rest_restores_input_mode() {
        let mut job = sample_job();
        job.set_data(DataSettings {
            training_data: Some(MlTableInput::new("./train").with_mode(InputMode::Download)),
            ..Default::default()
        });

        let back = ForecastingJob::from_rest_object(job.to_rest_object()).unwrap();

        assert_eq!(
            back.data().training_data.as_ref().and_then(|d| d.mode),
            Some(InputMode::Download)
        );
    }

    #[test]
    fn test_from_rest_rejects_invalid_identity_uuid() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.identity = Some(RestIdentity::Managed {
            client_id: Some("not-a-uuid".to_string()),
            object_id: None,
            resource_id: None,
        });

        assert!(matches!(
            ForecastingJob::from_rest_object(rest),
            Err(ConversionError::InvalidValue { field: "clientId", .. })
        ));
    }

    #[test]
    fn test_from_rest_skips_null_outputs_and_reads_system_data() {
        let mut rest = sample_job().to_rest_object();
        rest.properties.outputs.insert("pending".to_string(), None);
        rest.system_data = Some(RestSystemData {
            created_by: Some("alice".to_string()),
            ..Default::default()
        });

        let job = ForecastingJob::from_rest_object(rest).unwrap();

        assert!(job.job.outputs.is_empty());
        assert_eq!(
            job.job.creation_context.and_then(|c| c.created_by).as_deref(),
            Some("alice")
        );
    }
}
