//! Training settings shared by tabular jobs, plus the builder that applies
//! partial updates to them.
//!
//! [`apply_training_update`] is the shared tabular behaviour: it creates the
//! settings record on first use and overwrites only the supplied fields.  Job
//! types that need different defaults call it and then apply their own
//! override (see `ForecastingJob::set_training`).

use serde::{Deserialize, Serialize};

use crate::domain::enums::string_enum;
use crate::domain::overwrite;

string_enum! {
    /// Distributed training mode.
    pub enum TrainingMode {
        /// Currently the same as `NonDistributed`.
        Auto => ("Auto", "auto"),
        Distributed => ("Distributed", "distributed"),
        NonDistributed => ("NonDistributed", "non_distributed"),
    }
}

string_enum! {
    /// Meta-learner used by the stack ensemble.
    pub enum StackMetaLearnerType {
        None => ("None", "none"),
        LogisticRegression => ("LogisticRegression", "logistic_regression"),
        LogisticRegressionCv => ("LogisticRegressionCV", "logistic_regression_cv"),
        LightGbmClassifier => ("LightGBMClassifier", "light_gbm_classifier"),
        ElasticNet => ("ElasticNet", "elastic_net"),
        ElasticNetCv => ("ElasticNetCV", "elastic_net_cv"),
        LightGbmRegressor => ("LightGBMRegressor", "light_gbm_regressor"),
        LinearRegression => ("LinearRegression", "linear_regression"),
    }
}

/// Settings for the stack-ensemble iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackEnsembleSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_meta_learner_type: Option<StackMetaLearnerType>,
    /// Share of the training data reserved for the meta-learner (0.0–1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_meta_learner_train_percentage: Option<f64>,
    /// Free-form keyword arguments passed to the meta-learner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_meta_learner_kwargs: Option<serde_json::Value>,
}

/// Training toggles of a tabular job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_onnx_compatible_models: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_dnn_training: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_model_explainability: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_stack_ensemble: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_vote_ensemble: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_ensemble_settings: Option<StackEnsembleSettings>,
    /// Seconds allowed for downloading fitted models during ensembling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ensemble_model_download_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_training_algorithms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_training_algorithms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_mode: Option<TrainingMode>,
}

/// A partial update of [`TrainingSettings`].  `None` means "not passed".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingUpdate {
    pub enable_onnx_compatible_models: Option<bool>,
    pub enable_dnn_training: Option<bool>,
    pub enable_model_explainability: Option<bool>,
    pub enable_stack_ensemble: Option<bool>,
    pub enable_vote_ensemble: Option<bool>,
    pub stack_ensemble_settings: Option<StackEnsembleSettings>,
    pub ensemble_model_download_timeout: Option<u64>,
    pub allowed_training_algorithms: Option<Vec<String>>,
    pub blocked_training_algorithms: Option<Vec<String>>,
    pub training_mode: Option<TrainingMode>,
}

/// Creates the training record if absent, then overwrites each supplied field.
///
/// Returns the (now present) record so callers can apply follow-up overrides.
pub fn apply_training_update(
    slot: &mut Option<TrainingSettings>,
    update: TrainingUpdate,
) -> &mut TrainingSettings {
    let training = slot.get_or_insert_with(TrainingSettings::default);

    overwrite(&mut training.enable_onnx_compatible_models, update.enable_onnx_compatible_models);
    overwrite(&mut training.enable_dnn_training, update.enable_dnn_training);
    overwrite(&mut training.enable_model_explainability, update.enable_model_explainability);
    overwrite(&mut training.enable_stack_ensemble, update.enable_stack_ensemble);
    overwrite(&mut training.enable_vote_ensemble, update.enable_vote_ensemble);
    overwrite(&mut training.stack_ensemble_settings, update.stack_ensemble_settings);
    overwrite(
        &mut training.ensemble_model_download_timeout,
        update.ensemble_model_download_timeout,
    );
    overwrite(&mut training.allowed_training_algorithms, update.allowed_training_algorithms);
    overwrite(&mut training.blocked_training_algorithms, update.blocked_training_algorithms);
    overwrite(&mut training.training_mode, update.training_mode);

    training
}
