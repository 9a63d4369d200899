use std::time::Duration;

/// Parses k6-style durations: `30s`, `500ms`, `1.5s`, `2m`, `1h`, `1m30s`.
/// A bare number is read as seconds.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();

    if s.is_empty() {
        return Err("Duration string cannot be empty".to_string());
    }

    if let Ok(secs) = s.parse::<f64>() {
        return from_secs_checked(secs, input);
    }

    match humantime::parse_duration(s) {
        Ok(duration) => Ok(duration),
        // humantime only takes integers; k6 also allows a single decimal term like `1.5s`
        Err(e) => parse_decimal_term(s).ok_or_else(|| format!("Invalid duration '{input}': {e}"))?,
    }
}

fn parse_decimal_term(s: &str) -> Option<Result<Duration, String>> {
    let unit_start = s.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
    let (number, unit) = s.split_at(unit_start);
    if !number.contains('.') {
        return None;
    }
    let value: f64 = number.parse().ok()?;

    let secs = match unit {
        "ms" => value / 1_000.0,
        "s" => value,
        "m" => value * 60.0,
        "h" => value * 3_600.0,
        "d" => value * 86_400.0,
        _ => return None,
    };

    Some(from_secs_checked(secs, s))
}

fn from_secs_checked(secs: f64, input: &str) -> Result<Duration, String> {
    Duration::try_from_secs_f64(secs).map_err(|_| format!("Duration out of range: '{input}'"))
}
