use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info};

use crate::{
    engine::{pause::IterationPause, task::VirtualUserTask},
    errors::code_error::{CodeError, LoadTestResult, code_err},
    util::time::duration_formatter::format_duration,
};

/// How many virtual users run, for how long, and how long each one rests between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProfile {
    pub vus: u64,
    pub duration: Duration,
    pub iteration_pause: Duration,
}

/// Iterations one virtual user completed before the run deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VuReport {
    pub vu: u64,
    pub iterations: u64,
}

/// Spawns `profile.vus` virtual users with ids `1..=vus`, each repeating
/// iterate-then-pause until a deadline shared by all of them.
///
/// At the deadline every virtual user is stopped where it stands: an
/// in-flight iteration or pause is dropped, not awaited. Reports come back
/// ordered by virtual user id.
pub async fn run_load<T, P>(
    task: Arc<T>,
    pause: Arc<P>,
    profile: LoadProfile,
) -> LoadTestResult<Vec<VuReport>>
where
    T: VirtualUserTask,
    P: IterationPause,
{
    let start = Instant::now();
    let deadline = start + profile.duration;

    info!(
        vus = profile.vus,
        duration = %format_duration(profile.duration),
        iteration_pause = %format_duration(profile.iteration_pause),
        "Starting virtual users"
    );

    // Dropping the set (e.g. when the caller stops waiting) aborts every virtual user.
    let mut workers = JoinSet::new();

    for vu in 1..=profile.vus {
        let task = Arc::clone(&task);
        let pause = Arc::clone(&pause);
        let iteration_pause = profile.iteration_pause;

        workers.spawn(async move {
            debug!(vu, "Virtual user started");
            let mut iterations: u64 = 0;

            // timeout_at polls the inner future once before checking the deadline,
            // so the loop guards against starting an iteration past it.
            let _ = timeout_at(deadline, async {
                while Instant::now() < deadline {
                    task.run_iteration(vu).await;
                    iterations += 1;
                    pause.pause(iteration_pause).await;
                }
            })
            .await;

            debug!(vu, iterations, "Virtual user stopped");
            VuReport { vu, iterations }
        });
    }

    let mut reports = Vec::new();
    while let Some(joined) = workers.join_next().await {
        let report = joined.map_err(|e| code_err(CodeError::WORKER_JOIN_ERROR, e))?;
        reports.push(report);
    }
    reports.sort_unstable_by_key(|r| r.vu);

    info!(
        vus = reports.len(),
        iterations = reports.iter().map(|r| r.iterations).sum::<u64>(),
        elapsed = %format_duration(start.elapsed()),
        "Virtual users finished"
    );

    Ok(reports)
}
