//! # automl-core
//!
//! Configuration model for AutoML time-series forecasting jobs, together with
//! its REST wire representation and its TOML/YAML job documents.
//!
//! Nothing in this crate talks to a network or a filesystem except the
//! explicit `load_from_path` helper.  Submitting a job is the caller's business.
//!
//! # Architecture overview (for beginners)
//!
//! A forecasting job predicts future values of a time series (next week's
//! sales, tomorrow's load) by letting the service try many candidate models and
//! keep the one that scores best on a chosen metric.  This crate describes such
//! a job and moves it between its three representations:
//!
//! ```text
//!            to_dict / load_from_dict              to_rest_object / from_rest_object
//!  TOML/YAML  ◀──────────────────────▶  ForecastingJob  ◀──────────────────────▶  REST JSON
//!  (schema)                             (domain)                               (protocol)
//! ```
//!
//! - **`domain`** – The job entity and its settings records, plus the update
//!   rules (partial overwrite, lazy creation, stack-ensemble override).
//!
//! - **`protocol`** – The camelCase JSON model of the REST service, ISO-8601
//!   durations, and the converters between it and the domain.
//!
//! - **`schema`** – The two document layouts (standalone file and pipeline
//!   node) and the TOML/YAML text helpers.

pub mod domain;
pub mod protocol;
pub mod schema;

// Re-export the most-used types at the crate root so callers can write
// `automl_core::ForecastingJob` instead of the full module path.
pub use domain::forecasting_job::{ForecastingJob, ForecastingJobArgs};
pub use domain::forecasting_settings::{ForecastSettingsUpdate, ForecastingSettings};
pub use domain::metric::{ForecastingPrimaryMetric, MetricError, PrimaryMetric};
pub use domain::training::{TrainingSettings, TrainingUpdate};
pub use protocol::convert::ConversionError;
pub use protocol::rest::RestJobBase;
pub use schema::{DocumentFormat, DocumentMap, LoadContext, SchemaError, SchemaErrorKind};
