//! Primary metric selection for forecasting jobs.
//!
//! The primary metric is the scoring function used to rank candidate models
//! during the automated model search.  A job always has one: when the caller
//! does not choose, [`ForecastingPrimaryMetric::DEFAULT`] is used.
//!
//! # Concrete vs deferred metrics
//!
//! Inside a pipeline the metric may be supplied later by the parent pipeline,
//! written as a binding expression such as `${{parent.inputs.metric}}`.  The
//! real value is only known when the pipeline runs, so it cannot be checked
//! against the enumeration here.  [`PrimaryMetric`] therefore has two variants:
//!
//! ```text
//! "NormalizedRootMeanSquaredError"  ->  PrimaryMetric::Concrete(NormalizedRootMeanSquaredError)
//! "${{parent.inputs.metric}}"       ->  PrimaryMetric::Deferred("${{parent.inputs.metric}}")
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::domain::binding::is_parent_binding;
use crate::domain::enums::string_enum;

string_enum! {
    /// Metrics the service can optimise a forecasting job for.
    pub enum ForecastingPrimaryMetric {
        SpearmanCorrelation => ("SpearmanCorrelation", "spearman_correlation"),
        NormalizedRootMeanSquaredError => ("NormalizedRootMeanSquaredError", "normalized_root_mean_squared_error"),
        R2Score => ("R2Score", "r2_score"),
        NormalizedMeanAbsoluteError => ("NormalizedMeanAbsoluteError", "normalized_mean_absolute_error"),
    }
}

impl ForecastingPrimaryMetric {
    /// Metric used when none is given.
    pub const DEFAULT: ForecastingPrimaryMetric =
        ForecastingPrimaryMetric::NormalizedRootMeanSquaredError;
}

impl Default for ForecastingPrimaryMetric {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors raised while resolving a primary metric.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetricError {
    /// The input is neither a known metric nor a pipeline binding.
    #[error("invalid primary metric '{value}': expected one of {valid}")]
    InvalidValue { value: String, valid: String },
}

/// The primary metric of a job: a known metric or a pipeline binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimaryMetric {
    /// A validated metric.
    Concrete(ForecastingPrimaryMetric),
    /// A `${{parent...}}` expression, stored verbatim.
    Deferred(String),
}

impl PrimaryMetric {
    /// Resolves optional user input to a metric.
    ///
    /// - `None` resolves to the default metric.
    /// - A parent-pipeline binding is stored verbatim without validation.
    /// - Anything else is matched against [`ForecastingPrimaryMetric`] ignoring
    ///   case and `_`/`-`/space separators.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::InvalidValue`] naming the input and every valid
    /// metric when the lookup fails.
    pub fn parse(value: Option<&str>) -> Result<Self, MetricError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };

        if is_parent_binding(value) {
            return Ok(Self::Deferred(value.to_string()));
        }

        value
            .parse::<ForecastingPrimaryMetric>()
            .map(Self::Concrete)
            .map_err(|e| MetricError::InvalidValue {
                value: e.value,
                valid: e.valid.join(", "),
            })
    }

    /// Returns the concrete metric, or `None` for a deferred binding.
    pub fn concrete(&self) -> Option<ForecastingPrimaryMetric> {
        match self {
            Self::Concrete(metric) => Some(*metric),
            Self::Deferred(_) => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Spelling sent to the REST service.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Concrete(metric) => metric.as_wire(),
            Self::Deferred(expr) => expr,
        }
    }

    /// Spelling written to job documents.
    pub fn as_doc(&self) -> &str {
        match self {
            Self::Concrete(metric) => metric.as_doc(),
            Self::Deferred(expr) => expr,
        }
    }
}

impl Default for PrimaryMetric {
    fn default() -> Self {
        Self::Concrete(ForecastingPrimaryMetric::DEFAULT)
    }
}

impl From<ForecastingPrimaryMetric> for PrimaryMetric {
    fn from(metric: ForecastingPrimaryMetric) -> Self {
        Self::Concrete(metric)
    }
}

impl fmt::Display for PrimaryMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_doc())
    }
}

impl Serialize for PrimaryMetric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_doc())
    }
}

impl<'de> Deserialize<'de> for PrimaryMetric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(Some(&raw)).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_resolves_to_default_metric() {
        // Act
        let metric = PrimaryMetric::parse(None).unwrap();

        // Assert
        assert_eq!(
            metric,
            PrimaryMetric::Concrete(ForecastingPrimaryMetric::NormalizedRootMeanSquaredError)
        );
    }

    #[test]
    fn test_spellings_differing_by_case_and_separator_are_equivalent() {
        let spellings = [
            "R2Score",
            "r2_score",
            "R2_SCORE",
            "r2-score",
            "r2score",
            "R2 Score",
        ];
        for spelling in spellings {
            assert_eq!(
                PrimaryMetric::parse(Some(spelling)).unwrap(),
                PrimaryMetric::Concrete(ForecastingPrimaryMetric::R2Score),
                "spelling {spelling:?} must resolve to R2Score"
            );
        }
    }

    #[test]
    fn test_every_metric_parses_from_its_wire_and_doc_spelling() {
        for metric in ForecastingPrimaryMetric::ALL {
            assert_eq!(
                PrimaryMetric::parse(Some(metric.as_wire())).unwrap().concrete(),
                Some(*metric)
            );
            assert_eq!(
                PrimaryMetric::parse(Some(metric.as_doc())).unwrap().concrete(),
                Some(*metric)
            );
        }
    }

    #[test]
    fn test_unknown_metric_is_rejected_with_valid_set() {
        // Act
        let err = PrimaryMetric::parse(Some("Accuracy")).unwrap_err();

        // Assert
        let MetricError::InvalidValue { value, valid } = &err;
        assert_eq!(value, "Accuracy");
        assert!(valid.contains("normalized_root_mean_squared_error"));
        assert!(valid.contains("spearman_correlation"));
        assert!(err.to_string().contains("Accuracy"));
    }

    #[test]
    fn test_parent_binding_is_stored_verbatim() {
        let expr = "${{parent.inputs.primary_metric}}";
        let metric = PrimaryMetric::parse(Some(expr)).unwrap();

        assert_eq!(metric, PrimaryMetric::Deferred(expr.to_string()));
        assert!(metric.is_deferred());
        assert_eq!(metric.as_wire(), expr);
        assert_eq!(metric.as_doc(), expr);
    }

    #[test]
    fn test_non_parent_binding_is_validated_like_any_string() {
        assert!(PrimaryMetric::parse(Some("${{inputs.metric}}")).is_err());
    }

    #[test]
    fn test_wire_and_doc_spellings() {
        let metric = PrimaryMetric::from(ForecastingPrimaryMetric::NormalizedMeanAbsoluteError);
        assert_eq!(metric.as_wire(), "NormalizedMeanAbsoluteError");
        assert_eq!(metric.as_doc(), "normalized_mean_absolute_error");
        assert_eq!(metric.to_string(), "normalized_mean_absolute_error");
    }
}
