//! CLI entry point for the event manager.
//!
//! Provides subcommands for writing thank-you letters to every attendee and
//! for reporting peak registration times only.

mod infra;

use crate::infra::civicinfo::client::CivicInfoClient;
use crate::infra::keys::{EnvKeySource, FileKeySource, KeySource, resolve_api_key};
use anyhow::Result;
use clap::{Parser, Subcommand};
use event_manager::attendees::AttendeeReader;
use event_manager::letter::FormLetterRenderer;
use event_manager::output::{DirectoryWriter, print_json, print_pretty};
use event_manager::pipeline::{EventManager, RunReport, analyze_registrations};
use event_manager::services::civic_api::{OfflineLookup, RepresentativeLookup};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "event_manager")]
#[command(about = "Thank event attendees and report when they registered", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a thank-you letter per attendee and print peak registration times
    Letters {
        /// Attendee CSV file
        #[arg(short, long, default_value = "event_attendees.csv")]
        input: PathBuf,

        /// Directory letters are written to
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// File holding the Google Civic Information API key
        #[arg(short, long, default_value = "secret.key")]
        key_file: PathBuf,

        /// Also log the run report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print peak registration hour and day without writing letters
    Peaks {
        /// Attendee CSV file
        #[arg(short, long, default_value = "event_attendees.csv")]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/event_manager.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("event_manager.log"));

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

    info!("EventManager initialized");

    match cli.command {
        Commands::Letters {
            input,
            output_dir,
            key_file,
            json,
        } => {
            let lookup = lookup_client(&key_file).await?;
            let rows = AttendeeReader::from_path(&input)?;
            let manager = EventManager::new(
                lookup,
                FormLetterRenderer,
                DirectoryWriter::new(&output_dir),
            );

            let report = manager.run(rows).await?;
            info!(output_dir = %output_dir.display(), "Letters written");

            print_pretty(&report);
            if json {
                print_json(&report)?;
            }
            print_summary(&report);
        }
        Commands::Peaks { input } => {
            let rows = AttendeeReader::from_path(&input)?;
            let report = analyze_registrations(rows)?;
            print_pretty(&report);
            print_summary(&report);
        }
    }

    Ok(())
}

/// Builds the Civic Information client, or an offline lookup when no API key
/// is configured so every letter carries the fallback text.
#[tracing::instrument]
async fn lookup_client(key_file: &Path) -> Result<Box<dyn RepresentativeLookup>> {
    let env_source = EnvKeySource::new("CIVIC_API_KEY");
    let file_source = FileKeySource::new(key_file);

    let sources: [&dyn KeySource; 2] = [&env_source, &file_source];

    match resolve_api_key(&sources).await? {
        Some(key) => {
            let base_url = std::env::var("CIVIC_API_BASE_URL").ok();
            Ok(Box::new(CivicInfoClient::new(key, base_url)))
        }
        None => {
            warn!("No civic information API key found, letters will use the fallback text");
            Ok(Box::new(OfflineLookup))
        }
    }
}

/// Prints the two peak registration lines, or explains why there are none.
fn print_summary(report: &RunReport) {
    match &report.summary {
        Some(summary) => {
            for line in summary.lines() {
                println!("{line}");
            }
        }
        None => warn!(
            rows = report.rows_processed,
            "No registration times recorded, skipping peak summary"
        ),
    }
}
