//! The forecasting job entity.
//!
//! A [`ForecastingJob`] is the configuration of one AutoML forecasting run:
//! which data to train on, which column to predict, which metric to optimise,
//! and how the time series should be treated.  It is plain data: building one
//! does not contact the service, and dropping one releases nothing but memory.
//!
//! # Composition instead of inheritance
//!
//! ```text
//! ForecastingJob
//!  ├─ job: JobMetadata           name, tags, compute, identity, outputs, ...
//!  ├─ tabular: TabularTask       data, featurization, limits, training
//!  ├─ primary_metric             always set (default NRMSE)
//!  └─ forecasting_settings       absent until first configured
//! ```
//!
//! Conversions to the REST wire model live in [`crate::protocol::convert`];
//! conversions to job documents live in [`crate::schema`].

use tracing::{debug, warn};

use crate::domain::featurization::FeaturizationSettings;
use crate::domain::forecasting_settings::{ForecastSettingsUpdate, ForecastingSettings};
use crate::domain::job::JobMetadata;
use crate::domain::limits::LimitSettings;
use crate::domain::metric::{MetricError, PrimaryMetric};
use crate::domain::tabular::{DataSettings, LogVerbosity, TabularTask};
use crate::domain::training::{TrainingSettings, TrainingUpdate};

/// Constructor arguments for [`ForecastingJob::new`].
#[derive(Debug, Clone, Default)]
pub struct ForecastingJobArgs {
    /// Free-form metric name or `${{parent...}}` binding; `None` → default.
    pub primary_metric: Option<String>,
    pub forecasting_settings: Option<ForecastingSettings>,
    pub job: JobMetadata,
    pub data: DataSettings,
    pub featurization: Option<FeaturizationSettings>,
    pub limits: Option<LimitSettings>,
    pub training: Option<TrainingSettings>,
    /// `None` → [`LogVerbosity::Info`].
    pub log_verbosity: Option<LogVerbosity>,
}

/// Configuration of an AutoML forecasting job.
#[derive(Debug, Clone)]
pub struct ForecastingJob {
    /// Job-level metadata; not part of equality.
    pub job: JobMetadata,
    tabular: TabularTask,
    primary_metric: PrimaryMetric,
    forecasting_settings: Option<ForecastingSettings>,
}

impl ForecastingJob {
    /// Task type name used on the wire.
    pub const TASK_TYPE: &'static str = "Forecasting";

    /// Builds a job, resolving the primary metric.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidValue`] if `args.primary_metric` is
    /// neither a known metric nor a parent-pipeline binding.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use automl_core::domain::forecasting_job::{ForecastingJob, ForecastingJobArgs};
    /// use automl_core::domain::metric::{ForecastingPrimaryMetric, PrimaryMetric};
    ///
    /// let job = ForecastingJob::new(ForecastingJobArgs::default()).unwrap();
    /// assert_eq!(
    ///     job.primary_metric(),
    ///     &PrimaryMetric::Concrete(ForecastingPrimaryMetric::NormalizedRootMeanSquaredError)
    /// );
    /// assert!(job.forecasting_settings().is_none());
    /// ```
    pub fn new(args: ForecastingJobArgs) -> Result<Self, MetricError> {
        let primary_metric = PrimaryMetric::parse(args.primary_metric.as_deref())?;
        Ok(Self {
            job: args.job,
            tabular: TabularTask {
                data: args.data,
                featurization: args.featurization,
                limits: args.limits,
                training: args.training,
                log_verbosity: args.log_verbosity.unwrap_or_default(),
            },
            primary_metric,
            forecasting_settings: args.forecasting_settings,
        })
    }

    // ── Primary metric ────────────────────────────────────────────────────────

    pub fn primary_metric(&self) -> &PrimaryMetric {
        &self.primary_metric
    }

    /// Replaces the primary metric; `None` restores the default.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidValue`] for an unknown metric name.  The
    /// stored metric is left unchanged in that case.
    pub fn set_primary_metric(&mut self, value: Option<&str>) -> Result<(), MetricError> {
        self.primary_metric = PrimaryMetric::parse(value)?;
        Ok(())
    }

    // ── Forecasting settings ──────────────────────────────────────────────────

    pub fn forecasting_settings(&self) -> Option<&ForecastingSettings> {
        self.forecasting_settings.as_ref()
    }

    /// Updates the forecasting settings, creating them on first use.
    ///
    /// Only fields that `update` supplies are written; everything else keeps
    /// its stored value.  No combination of values is rejected here.
    pub fn set_forecast_settings(&mut self, update: ForecastSettingsUpdate) {
        if self.forecasting_settings.is_none() {
            debug!("creating forecasting settings on first update");
        }
        self.forecasting_settings
            .get_or_insert_with(ForecastingSettings::default)
            .apply(update);
    }

    // ── Training settings ─────────────────────────────────────────────────────

    /// Updates training settings, then disables stack ensembling unless this
    /// call explicitly set `enable_stack_ensemble`.
    ///
    /// The override runs on every call: a `true` set by an earlier call is
    /// reset to `false` by a later call that does not pass the flag.
    pub fn set_training(&mut self, update: TrainingUpdate) {
        let explicit_stack_ensemble = update.enable_stack_ensemble.is_some();
        let training = self.tabular.set_training(update);

        if !explicit_stack_ensemble {
            if training.enable_stack_ensemble == Some(true) {
                warn!("stack ensemble disabled for forecasting job; pass enable_stack_ensemble to keep it");
            }
            training.enable_stack_ensemble = Some(false);
        }
    }

    /// Current training settings, if any were configured.
    pub fn training(&self) -> Option<&TrainingSettings> {
        self.tabular.training.as_ref()
    }

    /// Current training settings, or the defaults when none were configured.
    pub fn training_or_default(&self) -> TrainingSettings {
        self.tabular.training.clone().unwrap_or_default()
    }

    // ── Shared tabular settings ───────────────────────────────────────────────

    pub fn tabular(&self) -> &TabularTask {
        &self.tabular
    }

    pub fn data(&self) -> &DataSettings {
        &self.tabular.data
    }

    pub fn set_data(&mut self, update: DataSettings) {
        self.tabular.set_data(update);
    }

    pub fn limits(&self) -> Option<&LimitSettings> {
        self.tabular.limits.as_ref()
    }

    pub fn set_limits(&mut self, update: LimitSettings) {
        self.tabular.set_limits(update);
    }

    pub fn featurization(&self) -> Option<&FeaturizationSettings> {
        self.tabular.featurization.as_ref()
    }

    pub fn set_featurization(&mut self, update: FeaturizationSettings) {
        self.tabular.set_featurization(update);
    }

    pub fn log_verbosity(&self) -> LogVerbosity {
        self.tabular.log_verbosity
    }

    pub fn set_log_verbosity(&mut self, verbosity: LogVerbosity) {
        self.tabular.log_verbosity = verbosity;
    }
}

/// Tabular settings, primary metric, and forecasting settings must all match.
/// Job metadata (name, tags, compute, ...) is ignored.
impl PartialEq for ForecastingJob {
    fn eq(&self, other: &Self) -> bool {
        self.tabular == other.tabular
            && self.primary_metric == other.primary_metric
            && self.forecasting_settings == other.forecasting_settings
    }
}
