//! Conversions between decimal hours and `HH:MM` clock strings.
//!
//! Minutes are rounded to the nearest whole minute, so round trips are lossy
//! below one-minute precision.

/// Render decimal hours as `HH:MM`. Negative values keep their sign
/// (`-01:30`), non-finite values fall back to `00:00`.
pub fn decimal_to_clock(hours: f64) -> String {
    if !hours.is_finite() {
        return "00:00".to_string();
    }

    let sign = if hours < 0.0 { "-" } else { "" };
    let abs = hours.abs();
    let mut h = abs.trunc() as u64;
    let mut m = ((abs - abs.trunc()) * 60.0).round() as u64;
    if m == 60 {
        h += 1;
        m = 0;
    }

    format!("{}{:02}:{:02}", sign, h, m)
}

/// Parse an `HH:MM` string into decimal hours. Anything without a `:`
/// separator, or with unparsable parts, yields 0.
pub fn clock_to_decimal(clock: &str) -> f64 {
    let Some((hours, minutes)) = clock.split_once(':') else {
        return 0.0;
    };

    match (parse_part(hours), parse_part(minutes)) {
        (Some(h), Some(m)) => h + m / 60.0,
        _ => 0.0,
    }
}

// An empty part counts as 0, so ":30" parses as half an hour.
fn parse_part(part: &str) -> Option<f64> {
    let trimmed = part.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse().ok()
}
