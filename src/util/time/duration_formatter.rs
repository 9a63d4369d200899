use std::time::Duration;

/// Human-readable duration for log lines, e.g. `1m 30.250s` or `450ms`.
pub fn format_duration(duration: Duration) -> String {
    let total_millis = duration.as_millis();

    if total_millis < 1_000 {
        return format!("{total_millis}ms");
    }

    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let seconds = (total_millis % 60_000) / 1_000;
    let millis = total_millis % 1_000;

    let secs = if millis == 0 {
        format!("{seconds}s")
    } else {
        format!("{seconds}.{millis:03}s")
    };

    match (hours, minutes) {
        (0, 0) => secs,
        (0, m) => format!("{m}m {secs}"),
        (h, m) => format!("{h}h {m}m {secs}"),
    }
}
