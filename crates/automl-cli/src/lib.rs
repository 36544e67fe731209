//! Command implementations of the `forecast-job` tool.
//!
//! Each command is a plain function that takes its inputs and returns the text
//! to print, so the binary only parses arguments and writes to stdout.  Tests
//! call these functions directly.

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use tracing::{debug, info};

use automl_core::{DocumentFormat, ForecastingJob, LoadContext, RestJobBase};

/// Text format of a job document on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Toml,
    Yaml,
}

impl From<OutputFormat> for DocumentFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toml => DocumentFormat::Toml,
            OutputFormat::Yaml => DocumentFormat::Yaml,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads a job document from `path`.
///
/// Relative input paths resolve against `base_path` when given, otherwise
/// against the document's directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension, or
/// does not match the selected layout.
pub fn load_document(
    path: &Path,
    inside_pipeline: bool,
    base_path: Option<&Path>,
) -> anyhow::Result<ForecastingJob> {
    let context = match base_path {
        Some(base) => LoadContext::new(base),
        None => LoadContext::for_file(path),
    };
    ForecastingJob::load_from_path_with_context(path, &context, inside_pipeline)
        .with_context(|| format!("failed to load job document {}", path.display()))
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// `render`: document → pretty REST JSON.
pub fn render(path: &Path, inside_pipeline: bool, base_path: Option<&Path>) -> anyhow::Result<String> {
    let job = load_document(path, inside_pipeline, base_path)?;
    info!(name = ?job.job.name, "rendering job as REST payload");
    serde_json::to_string_pretty(&job.to_rest_object()).context("failed to serialize REST payload")
}

/// `import`: REST JSON → document text.
pub fn import(json: &str, format: OutputFormat, inside_pipeline: bool) -> anyhow::Result<String> {
    let rest: RestJobBase = serde_json::from_str(json).context("input is not a REST job payload")?;
    let job = ForecastingJob::from_rest_object(rest).context("REST payload is not a forecasting job")?;
    debug!(?format, inside_pipeline, "writing job document");
    let document = job.to_dict(inside_pipeline)?;
    Ok(DocumentFormat::from(format).render(&document)?)
}

/// `check`: load a document and summarise it on one line.
pub fn check(path: &Path, inside_pipeline: bool) -> anyhow::Result<String> {
    let job = load_document(path, inside_pipeline, None)?;
    Ok(summary(&job))
}

/// One-line description of a job: metric, horizon, and time column.
pub fn summary(job: &ForecastingJob) -> String {
    let settings = job.forecasting_settings();
    let horizon = settings
        .and_then(|s| s.forecast_horizon.as_ref())
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    let time_column = settings
        .and_then(|s| s.time_column_name.as_deref())
        .unwrap_or("-");
    format!(
        "ok: metric={} horizon={} time_column={}",
        job.primary_metric(),
        horizon,
        time_column
    )
}
