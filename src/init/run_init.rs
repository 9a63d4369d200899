use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::{
    build_info::{BUILD_TIME, REQWEST_VERSION, RUST_VERSION},
    engine::{pause::TokioPause, run_load::run_load},
    init::cli::Cli,
    scenarios::signup::SignupRequestGenerator,
    util::time::duration_formatter::format_duration,
};

pub async fn run_init_proc(cli: Cli, start: tokio::time::Instant) -> anyhow::Result<()> {
    let config = cli.run_config()?;

    info!(
        build_time = BUILD_TIME,
        http_client = REQWEST_VERSION,
        rustc = RUST_VERSION,
        "Build info"
    );

    let generator = Arc::new(SignupRequestGenerator::from_config(&config)?);
    let profile = config.load_profile();

    let started_at = Utc::now();
    let ends_at = chrono::Duration::from_std(config.duration)
        .ok()
        .and_then(|duration| started_at.checked_add_signed(duration))
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true));

    info!(
        target_url = %generator.target_url(),
        vus = config.vus,
        duration = %format_duration(config.duration),
        iteration_pause = %format_duration(config.iteration_pause),
        request_timeout = %format_duration(config.request_timeout),
        started_at = %started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        ends_at = ?ends_at,
        init_elapsed = ?start.elapsed(),
        "Load test starting..."
    );

    tokio::select! {
        reports = run_load(generator, Arc::new(TokioPause), profile) => {
            reports?;
            info!(elapsed = %format_duration(start.elapsed()), "Load test complete");
        }
        _ = tokio::signal::ctrl_c() => {
            warn!(
                elapsed = %format_duration(start.elapsed()),
                "Interrupted; stopping virtual users"
            );
        }
    }

    Ok(())
}
