//! JSON wire model of the AutoML REST service.
//!
//! These structs mirror the service payload one-to-one: camelCase field
//! names, PascalCase enumeration values carried as plain strings, and
//! ISO-8601 duration strings.  They carry no behaviour; the translation to and
//! from the domain records lives in [`crate::protocol::convert`].
//!
//! # Shape of a forecasting job
//!
//! ```json
//! {
//!   "name": "sales-forecast",
//!   "properties": {
//!     "jobType": "AutoML",
//!     "computeId": "cpu-cluster",
//!     "taskDetails": {
//!       "taskType": "Forecasting",
//!       "targetColumnName": "sales",
//!       "trainingData": {"jobInputType": "mltable", "uri": "./train"},
//!       "primaryMetric": "NormalizedRootMeanSquaredError",
//!       "forecastingSettings": {"timeColumnName": "date", "seasonality": {"mode": "Auto"}}
//!     }
//!   }
//! }
//! ```
//!
//! Optional fields are omitted from the JSON when absent, and absent fields
//! deserialize to `None`.  Unknown fields are ignored so newer service
//! versions stay readable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Discriminator value of AutoML jobs.
pub const AUTOML_JOB_TYPE: &str = "AutoML";

/// `jobInputType` of MLTable inputs.
pub const MLTABLE_INPUT_TYPE: &str = "mltable";

// ── Envelope ──────────────────────────────────────────────────────────────────

/// Top-level resource returned by and sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestJobBase {
    /// Full ARM id; set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ARM resource type; set by the service.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    pub properties: RestAutoMlJob,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<RestSystemData>,
}

/// Audit information attached by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestSystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<String>,
}

/// Job properties of an AutoML job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestAutoMlJob {
    /// Always [`AUTOML_JOB_TYPE`] for jobs this crate produces.
    pub job_type: String,
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
    pub compute_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environment_variables: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub services: BTreeMap<String, serde_json::Value>,
    /// The service may return `null` for an output it has not resolved yet.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Option<RestJobOutput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<RestJobResources>,
    pub task_details: RestForecasting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<RestIdentity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_settings: Option<RestQueueSettings>,
    /// Read-only job status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

// ── Job-level records ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestJobOutput {
    pub job_output_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestJobResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shm_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_args: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestQueueSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

/// Job identity, discriminated by `identityType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "identityType")]
pub enum RestIdentity {
    #[serde(rename = "AMLToken")]
    AmlToken,
    Managed {
        #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
        client_id: Option<String>,
        #[serde(rename = "objectId", default, skip_serializing_if = "Option::is_none")]
        object_id: Option<String>,
        #[serde(rename = "resourceId", default, skip_serializing_if = "Option::is_none")]
        resource_id: Option<String>,
    },
    UserIdentity,
}

// ── Task details ──────────────────────────────────────────────────────────────

/// Forecasting task details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestForecasting {
    /// Always `"Forecasting"` for this task.
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_data: Option<RestMlTableJobInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_data: Option<RestMlTableJobInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_data_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<RestMlTableJobInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_split_column_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_cross_validations: Option<RestModeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featurization_settings: Option<RestFeaturizationSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_settings: Option<RestLimitSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_settings: Option<RestTrainingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_verbosity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecasting_settings: Option<RestForecastingSettings>,
}

/// An MLTable data input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestMlTableJobInput {
    pub job_input_type: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An integer that is either chosen by the service or fixed by the caller.
///
/// ```json
/// {"mode": "Auto"}
/// {"mode": "Custom", "value": 7}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RestModeValue {
    Auto,
    Custom { value: i64 },
}

/// Target lags: chosen by the service or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RestTargetLags {
    Auto,
    Custom { values: Vec<i32> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestForecastingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_or_region_for_holidays: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_step_size: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_lags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features_unknown_at_forecast_time: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_horizon: Option<RestModeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<RestModeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_series_handling_config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_aggregate_function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_lags: Option<RestTargetLags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rolling_window_size: Option<RestModeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_column_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_series_id_column_names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_stl: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestTrainingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_onnx_compatible_models: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_dnn_training: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_model_explainability: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_stack_ensemble: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_vote_ensemble: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_ensemble_settings: Option<RestStackEnsembleSettings>,
    /// ISO-8601 duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensemble_model_download_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_training_algorithms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_training_algorithms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestStackEnsembleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_meta_learner_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_meta_learner_train_percentage: Option<f64>,
    #[serde(
        rename = "stackMetaLearnerKWargs",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stack_meta_learner_kwargs: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestLimitSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_early_termination: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_trials: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cores_per_trial: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_trials: Option<i64>,
    /// ISO-8601 duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    /// ISO-8601 duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_timeout: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestFeaturizationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_transformers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name_and_types: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_params: Option<BTreeMap<String, Vec<RestColumnTransformer>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_dnn_featurization: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestColumnTransformer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_value_json_shapes() {
        assert_eq!(
            serde_json::to_value(RestModeValue::Auto).unwrap(),
            serde_json::json!({ "mode": "Auto" })
        );
        assert_eq!(
            serde_json::to_value(RestModeValue::Custom { value: 7 }).unwrap(),
            serde_json::json!({ "mode": "Custom", "value": 7 })
        );
    }

    #[test]
    fn test_target_lags_json_shape() {
        let lags = RestTargetLags::Custom { values: vec![1, 2] };
        assert_eq!(
            serde_json::to_value(lags).unwrap(),
            serde_json::json!({ "mode": "Custom", "values": [1, 2] })
        );
    }

    #[test]
    fn test_identity_json_shape() {
        // Arrange
        let identity = RestIdentity::Managed {
            client_id: Some("abc".to_string()),
            object_id: None,
            resource_id: None,
        };

        // Act
        let json = serde_json::to_value(&identity).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({ "identityType": "Managed", "clientId": "abc" })
        );
        let token: RestIdentity =
            serde_json::from_str(r#"{"identityType":"AMLToken"}"#).unwrap();
        assert_eq!(token, RestIdentity::AmlToken);
    }

    #[test]
    fn test_stack_kwargs_field_name() {
        let settings = RestStackEnsembleSettings {
            stack_meta_learner_kwargs: Some(serde_json::json!({ "alpha": 0.5 })),
            ..Default::default()
        };

        let json = serde_json::to_value(&settings).unwrap();

        assert!(json.get("stackMetaLearnerKWargs").is_some());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "taskType": "Forecasting",
            "somethingNew": true,
            "targetColumnName": "sales"
        }"#;

        let task: RestForecasting = serde_json::from_str(json).unwrap();

        assert_eq!(task.target_column_name.as_deref(), Some("sales"));
    }
}
