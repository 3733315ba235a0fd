//! CLI entry point for the outcome rater.
//!
//! Reads an outcome-mastery export, grades every student, and writes the
//! summary grade report as CSV.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use outcome_rater::{
    config::{GradebookConfig, HeaderFormat, Method},
    gradebook::{DEFAULT_INPUT_DIR, Gradebook, resolve_input},
    output::{print_json, print_pretty, report_filename, write_reports},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "outcome_rater")]
#[command(about = "Create a grade report from an outcome mastery export", long_about = None)]
struct Cli {
    /// Filename of the outcome export, relative to the input directory
    #[arg(value_name = "FILENAME")]
    filename: String,

    /// The first sort method
    #[arg(short, long, value_enum, default_value_t = Method::Outcome)]
    method: Method,

    /// Directory the export is read from (defaults to $OUTCOME_REPORTS_DIR or "outcome_reports")
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// CSV file to write the report to (defaults to "<today>_report.csv")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Substring marking practice outcomes
    #[arg(long, default_value = "-P-", allow_hyphen_values = true)]
    practice_code: String,

    /// Substring marking test outcomes
    #[arg(long, default_value = "-T-", allow_hyphen_values = true)]
    test_code: String,

    /// Also log every report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/outcome_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("outcome_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let input_dir = cli.input_dir.clone().unwrap_or_else(|| {
        std::env::var("OUTCOME_REPORTS_DIR")
            .unwrap_or_else(|_| DEFAULT_INPUT_DIR.to_string())
            .into()
    });
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report_filename(Local::now().date_naive())));

    let config = GradebookConfig {
        practice_code: cli.practice_code.clone(),
        test_code: cli.test_code.clone(),
        method: cli.method,
        header: HeaderFormat::default(),
    };

    run(&resolve_input(&input_dir, &cli.filename), &output, config, cli.json)
}

/// Loads the gradebook at `input`, grades every student, and writes the report to `output`.
#[tracing::instrument(skip(config), fields(input = %input.display(), output = %output.display(), method = ?config.method))]
fn run(input: &Path, output: &Path, config: GradebookConfig, json: bool) -> Result<()> {
    let gradebook = Gradebook::load(input, config)
        .with_context(|| format!("failed to load gradebook from {}", input.display()))?;

    let reports = gradebook
        .reports()
        .context("failed to build student reports")?;

    for report in &reports {
        print_pretty(report);
        if json {
            print_json(report)?;
        }
    }

    write_reports(output, &reports)
        .with_context(|| format!("failed to write report to {}", output.display()))?;

    info!(students = reports.len(), "Grade report complete");
    Ok(())
}
