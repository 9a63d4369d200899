use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::{
    errors::code_error::LoadTestResult,
    init::{
        config::{DEFAULT_TARGET_URL, RunConfig},
        logging::{LogFormat, LogOptions},
    },
    util::time::parse_duration::parse_duration,
};

/// Signup endpoint load test
#[derive(Parser, Debug, Clone)]
#[command(name = "signup-load-test")]
#[command(about = "Drives concurrent virtual users against a signup endpoint")]
#[command(version)]
pub struct Cli {
    /// Signup endpoint every virtual user POSTs to
    #[arg(long, env = "TARGET_URL", default_value = DEFAULT_TARGET_URL)]
    pub target_url: String,

    /// Number of concurrent virtual users
    #[arg(long, env = "VUS", default_value = "20")]
    pub vus: u64,

    /// How long the run lasts, e.g. 30s, 1m30s
    #[arg(long, env = "DURATION", default_value = "30s", value_parser = parse_duration)]
    pub duration: Duration,

    /// Pause each virtual user takes between iterations
    #[arg(long, env = "ITERATION_PAUSE", default_value = "1s", value_parser = parse_duration)]
    pub pause: Duration,

    /// Per-request timeout
    #[arg(long, env = "REQUEST_TIMEOUT", default_value = "60s", value_parser = parse_duration)]
    pub request_timeout: Duration,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Also write daily-rolling log files into this directory
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable verbose logging (per-request lines)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Loads `.env` (outside AWS) and parses flags; flags win over environment.
    pub fn load() -> anyhow::Result<Self> {
        if std::env::var("IS_AWS").is_err() {
            match dotenvy::dotenv() {
                Ok(_) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Cli::parse())
    }

    pub fn run_config(&self) -> LoadTestResult<RunConfig> {
        RunConfig::new(
            &self.target_url,
            self.vus,
            self.duration,
            self.pause,
            self.request_timeout,
        )
    }

    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            format: self.log_format,
            dir: self.log_dir.clone(),
            verbose: self.verbose,
        }
    }
}
