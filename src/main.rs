//! CLI entry point for the apron turnaround schedule.
//!
//! Loads the arrivals and departures feeds, reconciles them over a window
//! around the current time and writes the day's traffic sheet.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use apron_schedule::{
    config::FeedConfig,
    fetch::{BasicClient, DefaultHeaders, try_load_feed},
    output::{export_schedule, print_json},
    pipeline::build_schedule,
    window::TimeWindow,
};
use chrono::{Local, Utc};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const ARRIVALS_URL: &str = "https://www.isavia.is/fids/arrivals.aspx?_=1684513438221";
const DEPARTURES_URL: &str = "https://www.isavia.is/fids/departures.aspx?_=1684682369206";

#[derive(Parser)]
#[command(name = "apron_schedule")]
#[command(about = "Build the apron turnaround sheet from arrival and departure feeds", long_about = None)]
struct Cli {
    /// Hours before now to include
    #[arg(long = "bf", value_name = "HOURS", allow_negative_numbers = true)]
    hours_before: i64,

    /// Hours after now to include
    #[arg(long = "af", value_name = "HOURS", allow_negative_numbers = true)]
    hours_after: i64,

    /// Arrivals feed URL or file (defaults to $ARRIVALS_URL, then the airport FIDS)
    #[arg(long, value_name = "FILE_OR_URL")]
    arrivals: Option<String>,

    /// Departures feed URL or file (defaults to $DEPARTURES_URL, then the airport FIDS)
    #[arg(long, value_name = "FILE_OR_URL")]
    departures: Option<String>,

    /// JSON file with operator selection and field names
    #[arg(short, long)]
    config: Option<String>,

    /// Directory the traffic sheet is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Log the schedule as JSON instead of writing the sheet
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/apron_schedule.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("apron_schedule.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(Some(path)) => println!("Data exported successfully to {}", path.display()),
        Ok(None) => println!("Dry run complete, no sheet written."),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Schedule run failed");
            eprintln!("Error: {e:#}");
            drop(file_guard);
            std::process::exit(1);
        }
    }
}

/// Loads both feeds, builds the schedule and writes the sheet.
///
/// Returns the sheet path, or `None` on a dry run.
async fn run(cli: Cli) -> Result<Option<PathBuf>> {
    let config = match &cli.config {
        Some(path) => FeedConfig::load(path)?,
        None => FeedConfig::default(),
    };

    let arrivals_source = feed_source(cli.arrivals, "ARRIVALS_URL", ARRIVALS_URL);
    let departures_source = feed_source(cli.departures, "DEPARTURES_URL", DEPARTURES_URL);

    let client = DefaultHeaders::new(BasicClient::new());
    let (arrivals, departures) = tokio::join!(
        try_load_feed(&client, &arrivals_source),
        try_load_feed(&client, &departures_source)
    );
    let arrivals = arrivals.map_err(|e| {
        anyhow!("error while {} arrivals from {arrivals_source}: {e}", e.step())
    })?;
    let departures = departures.map_err(|e| {
        anyhow!("error while {} departures from {departures_source}: {e}", e.step())
    })?;

    let window = TimeWindow::around(Utc::now(), cli.hours_before, cli.hours_after)
        .context("error while computing the time window")?;
    info!(start = %window.start, end = %window.end, "Time window");

    let schedule = build_schedule(&arrivals, &departures, &config, &window)?;

    if cli.dry_run {
        print_json(&schedule)?;
        return Ok(None);
    }

    let path = export_schedule(&cli.output_dir, &schedule, Local::now().naive_local())
        .context("error while exporting data")?;
    Ok(Some(path))
}

fn feed_source(arg: Option<String>, env_key: &str, default: &str) -> String {
    arg.or_else(|| std::env::var(env_key).ok())
        .unwrap_or_else(|| default.to_string())
}
