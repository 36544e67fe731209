//! The tabular part of an AutoML job: data references, column roles, and the
//! featurization / limit / training sub-records.
//!
//! Forecasting jobs are tabular jobs with extra settings.  Rather than
//! inheriting from a base job type, [`ForecastingJob`] *contains* a
//! [`TabularTask`] and delegates the shared behaviour to it.
//!
//! [`ForecastingJob`]: crate::domain::forecasting_job::ForecastingJob

use tracing::debug;

use crate::domain::auto::AutoOr;
use crate::domain::binding::is_data_binding_expression;
use crate::domain::enums::string_enum;
use crate::domain::featurization::FeaturizationSettings;
use crate::domain::limits::LimitSettings;
use crate::domain::overwrite;
use crate::domain::training::{apply_training_update, TrainingSettings, TrainingUpdate};

string_enum! {
    /// How a data input is made available to the training compute.
    pub enum InputMode {
        ReadOnlyMount => ("ReadOnlyMount", "ro_mount"),
        ReadWriteMount => ("ReadWriteMount", "rw_mount"),
        Download => ("Download", "download"),
        Direct => ("Direct", "direct"),
        EvalMount => ("EvalMount", "eval_mount"),
        EvalDownload => ("EvalDownload", "eval_download"),
    }
}

string_enum! {
    /// Verbosity of the service-side job logs.
    pub enum LogVerbosity {
        NotSet => ("NotSet", "not_set"),
        Debug => ("Debug", "debug"),
        Info => ("Info", "info"),
        Warning => ("Warning", "warning"),
        Error => ("Error", "error"),
        Critical => ("Critical", "critical"),
    }
}

impl Default for LogVerbosity {
    fn default() -> Self {
        Self::Info
    }
}

/// Number of cross-validation folds: `auto` or a fixed count.
pub type NCrossValidations = AutoOr<u32>;

/// A reference to an MLTable data asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MlTableInput {
    /// Local path, URI, `azureml:` asset reference, or pipeline binding.
    pub path: String,
    pub mode: Option<InputMode>,
}

impl MlTableInput {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: InputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Returns `true` when the path is a `${{...}}` expression bound by an
    /// enclosing pipeline.
    pub fn is_binding(&self) -> bool {
        is_data_binding_expression(&self.path, &[])
    }
}

/// Data references and column roles of a tabular job.
///
/// Also used as the argument of [`TabularTask::set_data`], where `None`
/// fields mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSettings {
    pub target_column_name: Option<String>,
    pub training_data: Option<MlTableInput>,
    pub validation_data: Option<MlTableInput>,
    /// Fraction of the training data held out for validation.
    pub validation_data_size: Option<f64>,
    pub weight_column_name: Option<String>,
    pub cv_split_column_names: Option<Vec<String>>,
    pub n_cross_validations: Option<NCrossValidations>,
    pub test_data: Option<MlTableInput>,
    /// Fraction of the training data held out for testing.
    pub test_data_size: Option<f64>,
}

impl DataSettings {
    fn merge(&mut self, update: DataSettings) {
        overwrite(&mut self.target_column_name, update.target_column_name);
        overwrite(&mut self.training_data, update.training_data);
        overwrite(&mut self.validation_data, update.validation_data);
        overwrite(&mut self.validation_data_size, update.validation_data_size);
        overwrite(&mut self.weight_column_name, update.weight_column_name);
        overwrite(&mut self.cv_split_column_names, update.cv_split_column_names);
        overwrite(&mut self.n_cross_validations, update.n_cross_validations);
        overwrite(&mut self.test_data, update.test_data);
        overwrite(&mut self.test_data_size, update.test_data_size);
    }
}

/// Everything a tabular AutoML task carries besides its task-specific settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularTask {
    pub data: DataSettings,
    pub featurization: Option<FeaturizationSettings>,
    pub limits: Option<LimitSettings>,
    pub training: Option<TrainingSettings>,
    pub log_verbosity: LogVerbosity,
}

impl TabularTask {
    /// Overwrites each supplied data field.
    pub fn set_data(&mut self, update: DataSettings) {
        debug!("updating tabular data settings");
        self.data.merge(update);
    }

    /// Creates the limits record if needed and overwrites each supplied field.
    pub fn set_limits(&mut self, update: LimitSettings) {
        self.limits
            .get_or_insert_with(LimitSettings::default)
            .merge(update);
    }

    /// Creates the featurization record if needed and overwrites each supplied field.
    pub fn set_featurization(&mut self, update: FeaturizationSettings) {
        self.featurization
            .get_or_insert_with(FeaturizationSettings::default)
            .merge(update);
    }

    /// The shared training-settings update; job types add their own overrides.
    pub fn set_training(&mut self, update: TrainingUpdate) -> &mut TrainingSettings {
        apply_training_update(&mut self.training, update)
    }
}
