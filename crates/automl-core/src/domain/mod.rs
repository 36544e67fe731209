//! Domain records for AutoML forecasting jobs.
//!
//! This module contains the configuration model and its update rules.  It
//! knows nothing about the REST wire format or job documents; those live in
//! [`crate::protocol`] and [`crate::schema`] and depend on this module, never
//! the other way round.
//!
//! # How the records nest (for beginners)
//!
//! ```text
//! ForecastingJob
//!  ├─ JobMetadata            (job.rs)
//!  ├─ TabularTask            (tabular.rs)
//!  │   ├─ DataSettings
//!  │   ├─ FeaturizationSettings  (featurization.rs)
//!  │   ├─ LimitSettings          (limits.rs)
//!  │   └─ TrainingSettings       (training.rs)
//!  ├─ PrimaryMetric          (metric.rs)
//!  └─ ForecastingSettings    (forecasting_settings.rs)
//! ```
//!
//! Every optional setting is an `Option`.  Updates follow one rule throughout:
//! a `Some` in the update overwrites, a `None` leaves the stored value alone.

pub mod auto;
pub mod binding;
pub mod enums;
pub mod featurization;
pub mod forecasting_job;
pub mod forecasting_settings;
pub mod job;
pub mod limits;
pub mod metric;
pub(crate) mod serde_util;
pub mod tabular;
pub mod training;

pub use auto::{AutoOr, TargetLags};
pub use enums::ParseEnumError;
pub use forecasting_job::{ForecastingJob, ForecastingJobArgs};
pub use forecasting_settings::{ForecastSettingsUpdate, ForecastingSettings};
pub use metric::{ForecastingPrimaryMetric, MetricError, PrimaryMetric};

/// Overwrites `slot` when `value` is supplied; leaves it alone otherwise.
pub(crate) fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_replaces_only_when_supplied() {
        let mut slot = Some(1);

        overwrite(&mut slot, None);
        assert_eq!(slot, Some(1));

        overwrite(&mut slot, Some(2));
        assert_eq!(slot, Some(2));
    }
}
