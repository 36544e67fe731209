//! Criterion benchmarks for job conversions.
//!
//! Measures the cost of building the REST payload, parsing it back, and
//! loading a job document, for a minimal job and a fully configured one.
//!
//! Run with:
//! ```bash
//! cargo bench --package automl-core --bench conversion_bench
//! ```

use automl_core::domain::auto::{AutoOr, TargetLags};
use automl_core::domain::forecasting_settings::UseStl;
use automl_core::domain::limits::LimitSettings;
use automl_core::domain::tabular::{DataSettings, MlTableInput};
use automl_core::{
    ForecastSettingsUpdate, ForecastingJob, ForecastingJobArgs, LoadContext, RestJobBase,
    TrainingUpdate,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ── Job fixtures ──────────────────────────────────────────────────────────────

fn make_minimal() -> ForecastingJob {
    ForecastingJob::new(ForecastingJobArgs {
        data: DataSettings {
            target_column_name: Some("sales".to_string()),
            training_data: Some(MlTableInput::new("azureml:sales:1")),
            ..Default::default()
        },
        ..Default::default()
    })
    .expect("valid job")
}

fn make_full() -> ForecastingJob {
    let mut job = make_minimal();
    job.job.name = Some("sales-forecast".to_string());
    job.job.compute = Some("cpu-cluster".to_string());
    job.set_forecast_settings(ForecastSettingsUpdate {
        time_column_name: Some("date".to_string()),
        forecast_horizon: Some(AutoOr::Value(14)),
        time_series_id_column_names: Some(vec!["store".to_string(), "item".to_string()]),
        target_lags: Some(TargetLags::Values(vec![1, 7, 14])),
        use_stl: Some(UseStl::SeasonTrend),
        seasonality: Some(AutoOr::Auto),
        frequency: Some("D".to_string()),
        ..Default::default()
    });
    job.set_training(TrainingUpdate {
        enable_dnn_training: Some(true),
        ensemble_model_download_timeout: Some(300),
        ..Default::default()
    });
    job.set_limits(LimitSettings {
        max_trials: Some(40),
        timeout_minutes: Some(180),
        ..Default::default()
    });
    job
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_to_rest(c: &mut Criterion) {
    let jobs = [("minimal", make_minimal()), ("full", make_full())];

    let mut group = c.benchmark_group("to_rest_object");
    for (name, job) in &jobs {
        group.bench_with_input(BenchmarkId::new("job", name), job, |b, job| {
            b.iter(|| black_box(job).to_rest_object());
        });
    }
    group.finish();
}

fn bench_from_rest(c: &mut Criterion) {
    let payloads: Vec<(&str, RestJobBase)> = vec![
        ("minimal", make_minimal().to_rest_object()),
        ("full", make_full().to_rest_object()),
    ];

    let mut group = c.benchmark_group("from_rest_object");
    for (name, rest) in &payloads {
        group.bench_with_input(BenchmarkId::new("job", name), rest, |b, rest| {
            b.iter(|| ForecastingJob::from_rest_object(black_box(rest.clone())).expect("convert"));
        });
    }
    group.finish();
}

fn bench_documents(c: &mut Criterion) {
    let toml_text = make_full().to_toml_string(false).expect("dump");
    let yaml_text = make_full().to_yaml_string(false).expect("dump");
    let context = LoadContext::default();

    let mut group = c.benchmark_group("load_document");
    group.bench_function("toml", |b| {
        b.iter(|| ForecastingJob::from_toml_str(black_box(&toml_text), &context, false).expect("load"));
    });
    group.bench_function("yaml", |b| {
        b.iter(|| ForecastingJob::from_yaml_str(black_box(&yaml_text), &context, false).expect("load"));
    });
    group.finish();
}

criterion_group!(benches, bench_to_rest, bench_from_rest, bench_documents);
criterion_main!(benches);
