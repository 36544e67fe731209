//! Forecasting-specific settings and their partial-update operation.
//!
//! [`ForecastingSettings`] is the nested record a forecasting job carries once
//! any forecasting parameter has been configured.  Every field is optional; an
//! absent field means "use the service default".
//!
//! Updates go through [`ForecastSettingsUpdate`]: each `Some` field overwrites
//! the stored value, each `None` field leaves it alone.  No cross-field rules
//! are checked here (for example, `target_aggregate_function` needs a
//! `frequency`); the service validates those on submission.

use serde::{Deserialize, Serialize};

use crate::domain::auto::{AutoOr, TargetLags};
use crate::domain::enums::string_enum;
use crate::domain::overwrite;
use crate::domain::serde_util::one_or_many;

string_enum! {
    /// Whether lags are generated for numeric features.
    pub enum FeatureLags {
        None => ("None", "none"),
        Auto => ("Auto", "auto"),
    }
}

string_enum! {
    /// STL decomposition of the target column.
    pub enum UseStl {
        /// No decomposition.
        None => ("None", "none"),
        /// Generate the season component only.
        Season => ("Season", "season"),
        /// Generate both season and trend components.
        SeasonTrend => ("SeasonTrend", "season_trend"),
    }
}

string_enum! {
    /// Policy for series shorter than the minimum length the service needs.
    pub enum ShortSeriesHandling {
        /// Leave short series unmodified.
        None => ("None", "none"),
        /// Pad when there are no long series, otherwise drop.
        Auto => ("Auto", "auto"),
        /// Pad every short series.
        Pad => ("Pad", "pad"),
        /// Drop every short series.
        Drop => ("Drop", "drop"),
    }
}

string_enum! {
    /// Function used to aggregate the target to the requested frequency.
    pub enum TargetAggregateFunction {
        None => ("None", "none"),
        Sum => ("Sum", "sum"),
        Max => ("Max", "max"),
        Min => ("Min", "min"),
        Mean => ("Mean", "mean"),
    }
}

/// Forecasting parameters of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastingSettings {
    /// Datetime column used to build the series and infer its frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_column_name: Option<String>,
    /// Maximum horizon, in units of the series frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_horizon: Option<AutoOr<u32>>,
    /// Columns that identify individual series.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many::deserialize"
    )]
    pub time_series_id_column_names: Option<Vec<String>>,
    /// Periods by which the target is lagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_lags: Option<TargetLags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_lags: Option<FeatureLags>,
    /// Trailing periods averaged into the rolling-window feature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_rolling_window_size: Option<AutoOr<u32>>,
    /// ISO 3166 two-letter code used for holiday features (e.g. `US`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_or_region_for_holidays: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_stl: Option<UseStl>,
    /// Seasonality as a multiple of the series frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<AutoOr<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_series_handling_config: Option<ShortSeriesHandling>,
    /// Forecast frequency as a pandas offset alias (`D`, `W`, `MS`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_aggregate_function: Option<TargetAggregateFunction>,
    /// Periods between the origin times of consecutive CV folds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_step_size: Option<u32>,
    /// Columns known during training but not at forecast time.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many::deserialize"
    )]
    pub features_unknown_at_forecast_time: Option<Vec<String>>,
}

/// A partial update of [`ForecastingSettings`].
///
/// Build with struct-update syntax so only the fields of interest are named:
///
/// ```rust
/// use automl_core::domain::forecasting_settings::ForecastSettingsUpdate;
///
/// let update = ForecastSettingsUpdate {
///     time_column_name: Some("date".to_string()),
///     ..Default::default()
/// };
/// assert!(update.seasonality.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSettingsUpdate {
    pub time_column_name: Option<String>,
    pub forecast_horizon: Option<AutoOr<u32>>,
    pub time_series_id_column_names: Option<Vec<String>>,
    pub target_lags: Option<TargetLags>,
    pub feature_lags: Option<FeatureLags>,
    pub target_rolling_window_size: Option<AutoOr<u32>>,
    pub country_or_region_for_holidays: Option<String>,
    pub use_stl: Option<UseStl>,
    pub seasonality: Option<AutoOr<u32>>,
    pub short_series_handling_config: Option<ShortSeriesHandling>,
    pub frequency: Option<String>,
    pub target_aggregate_function: Option<TargetAggregateFunction>,
    pub cv_step_size: Option<u32>,
    pub features_unknown_at_forecast_time: Option<Vec<String>>,
}

impl ForecastSettingsUpdate {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ForecastingSettings {
    /// Applies `update`, overwriting only the fields it supplies.
    pub fn apply(&mut self, update: ForecastSettingsUpdate) {
        overwrite(&mut self.country_or_region_for_holidays, update.country_or_region_for_holidays);
        overwrite(&mut self.cv_step_size, update.cv_step_size);
        overwrite(&mut self.forecast_horizon, update.forecast_horizon);
        overwrite(&mut self.target_lags, update.target_lags);
        overwrite(&mut self.target_rolling_window_size, update.target_rolling_window_size);
        overwrite(&mut self.frequency, update.frequency);
        overwrite(&mut self.feature_lags, update.feature_lags);
        overwrite(&mut self.seasonality, update.seasonality);
        overwrite(&mut self.use_stl, update.use_stl);
        overwrite(&mut self.short_series_handling_config, update.short_series_handling_config);
        overwrite(&mut self.target_aggregate_function, update.target_aggregate_function);
        overwrite(&mut self.time_column_name, update.time_column_name);
        overwrite(&mut self.time_series_id_column_names, update.time_series_id_column_names);
        overwrite(
            &mut self.features_unknown_at_forecast_time,
            update.features_unknown_at_forecast_time,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overwrites_only_supplied_fields() {
        // Arrange
        let mut settings = ForecastingSettings {
            time_column_name: Some("date".to_string()),
            forecast_horizon: Some(AutoOr::Value(7)),
            ..Default::default()
        };

        // Act
        settings.apply(ForecastSettingsUpdate {
            seasonality: Some(AutoOr::Auto),
            ..Default::default()
        });

        // Assert
        assert_eq!(settings.time_column_name.as_deref(), Some("date"));
        assert_eq!(settings.forecast_horizon, Some(AutoOr::Value(7)));
        assert_eq!(settings.seasonality, Some(AutoOr::Auto));
        assert_eq!(settings.frequency, None);
    }

    #[test]
    fn test_apply_replaces_existing_value() {
        let mut settings = ForecastingSettings {
            frequency: Some("D".to_string()),
            ..Default::default()
        };

        settings.apply(ForecastSettingsUpdate {
            frequency: Some("W".to_string()),
            ..Default::default()
        });

        assert_eq!(settings.frequency.as_deref(), Some("W"));
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        let original = ForecastingSettings {
            use_stl: Some(UseStl::SeasonTrend),
            cv_step_size: Some(3),
            ..Default::default()
        };
        let mut settings = original.clone();

        let update = ForecastSettingsUpdate::default();
        assert!(update.is_empty());
        settings.apply(update);

        assert_eq!(settings, original);
    }

    #[test]
    fn test_enum_spellings() {
        assert_eq!("season_trend".parse::<UseStl>(), Ok(UseStl::SeasonTrend));
        assert_eq!(UseStl::SeasonTrend.as_wire(), "SeasonTrend");
        assert_eq!("PAD".parse::<ShortSeriesHandling>(), Ok(ShortSeriesHandling::Pad));
        assert_eq!("Mean".parse::<TargetAggregateFunction>(), Ok(TargetAggregateFunction::Mean));
        assert!("median".parse::<TargetAggregateFunction>().is_err());
    }

    #[test]
    fn test_document_accepts_single_id_column_string() {
        // Arrange
        let doc = r#"
time_column_name = "date"
time_series_id_column_names = "store"
target_lags = 3
seasonality = "auto"
use_stl = "season"
"#;

        // Act
        let settings: ForecastingSettings = toml::from_str(doc).expect("deserialize");

        // Assert
        assert_eq!(settings.time_series_id_column_names, Some(vec!["store".to_string()]));
        assert_eq!(settings.target_lags, Some(TargetLags::Values(vec![3])));
        assert_eq!(settings.seasonality, Some(AutoOr::Auto));
        assert_eq!(settings.use_stl, Some(UseStl::Season));
    }

    #[test]
    fn test_document_rejects_unknown_field() {
        let result: Result<ForecastingSettings, _> = toml::from_str("horizon = 3");
        assert!(result.is_err());
    }

    #[test]
    fn test_absent_fields_are_omitted_when_serialized() {
        let settings = ForecastingSettings {
            time_column_name: Some("date".to_string()),
            ..Default::default()
        };

        let text = toml::to_string(&settings).expect("serialize");

        assert_eq!(text.trim(), "time_column_name = \"date\"");
    }
}
