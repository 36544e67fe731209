//! `forecast-job`: work with forecasting job documents from the shell.
//!
//! # Usage
//!
//! ```text
//! forecast-job [--log-level <LEVEL>] <COMMAND>
//!
//! Commands:
//!   render <DOC> [--inside-pipeline] [--base-path DIR]   document → REST JSON
//!   import <JSON> [--format toml|yaml] [--inside-pipeline] REST JSON → document
//!   check  <DOC> [--inside-pipeline]                     validate and summarise
//! ```
//!
//! `import` reads the payload from stdin when `<JSON>` is `-`.
//!
//! # Environment variable overrides
//!
//! | Variable           | Default | Description                          |
//! |--------------------|---------|--------------------------------------|
//! | `FORECAST_JOB_LOG` | `warn`  | Log level when `RUST_LOG` is not set |

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use automl_cli::OutputFormat;

// ── CLI argument definitions ──────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "forecast-job",
    about = "Render, import, and check AutoML forecasting job documents",
    version
)]
struct Cli {
    /// Log level used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn", env = "FORECAST_JOB_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a TOML/YAML job document and print its REST payload.
    Render {
        document: PathBuf,
        /// Treat the document as a pipeline node.
        #[arg(long)]
        inside_pipeline: bool,
        /// Resolve relative input paths against this directory instead of the
        /// document's own.
        #[arg(long)]
        base_path: Option<PathBuf>,
    },
    /// Read a REST payload and print it as a job document.
    Import {
        /// Path to the JSON payload, or `-` for stdin.
        payload: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
        #[arg(long)]
        inside_pipeline: bool,
    },
    /// Load a job document and print a one-line summary.
    Check {
        document: PathBuf,
        #[arg(long)]
        inside_pipeline: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `RUST_LOG` wins; otherwise fall back to --log-level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let output = match cli.command {
        Command::Render {
            document,
            inside_pipeline,
            base_path,
        } => automl_cli::render(&document, inside_pipeline, base_path.as_deref())?,
        Command::Import {
            payload,
            format,
            inside_pipeline,
        } => {
            let json = read_payload(&payload)?;
            automl_cli::import(&json, format, inside_pipeline)?
        }
        Command::Check {
            document,
            inside_pipeline,
        } => automl_cli::check(&document, inside_pipeline)?,
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read payload from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
