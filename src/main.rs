//! CLI entry point for the student topper tool.
//!
//! Provides subcommands for grading a student score file and for reporting
//! the top student overall and per institution.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_topper::analyzers::analyzer::{analyze, grade_source};
use student_topper::fetch::{BasicClient, Source};
use student_topper::output::{
    print_pretty, render_json, render_text, write_graded_csv, write_json,
};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_topper")]
#[command(about = "Grade student test scores and find the toppers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade every student in a CSV file or URL and write the graded records
    Grade {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to write graded records to
        #[arg(short, long, default_value = "graded.csv")]
        output: PathBuf,

        /// Gzip compress the graded CSV
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Find the top student overall and per institution
    Toppers {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Report format printed to stdout
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Optional: also write the report as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %format!("{e:#}"), "Run aborted");
        return Err(e);
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/student_topper.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_topper.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

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

    Ok(file_guard)
}

fn run(cli: Cli) -> Result<()> {
    let client = BasicClient::new();

    match cli.command {
        Commands::Grade {
            source,
            output,
            gzip,
        } => {
            let source = Source::parse(&source);
            let graded = grade_source(&source, &client)?;

            write_graded_csv(&output, &graded, gzip)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(
                records = graded.len(),
                output = %output.display(),
                "Graded records written"
            );
        }
        Commands::Toppers {
            source,
            format,
            out,
        } => {
            let source = Source::parse(&source);
            let report = analyze(&source, &client)?;
            print_pretty(&report);

            match format {
                Format::Text => print!("{}", render_text(&report)),
                Format::Json => println!("{}", render_json(&report)?),
            }

            if let Some(path) = out {
                write_json(&path, &report)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "Report written");
            }
        }
    }

    Ok(())
}
