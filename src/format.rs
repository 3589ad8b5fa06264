//! Human readable durations for tables, tooltips and the chart axis.

use chrono::{DateTime, TimeZone};

/// `"HHh MMm"`, e.g. `90.0` → `"01h 30m"`.
pub fn minutes_to_string(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0).floor();
    let rest = (minutes - hours * 60.0).floor();
    format!("{:02}h {:02}m", hours as i64, rest as i64)
}

/// `"HHh MMm Ss"`, seconds taken from the fractional minute.
pub fn minutes_to_string_with_seconds(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let hours = (minutes / 60.0).floor();
    let whole = (minutes - hours * 60.0).floor();
    let seconds = ((minutes - hours * 60.0 - whole) * 60.0).floor();
    format!("{:02}h {:02}m {}s", hours as i64, whole as i64, seconds as i64)
}

pub fn minutes_to_hours(minutes: f64) -> i64 {
    (minutes / 60.0).floor() as i64
}

/// Axis tick label, `"H:MM"`.
pub fn axis_label(minutes: i64) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// `"HHh : MMm : SSs"` between two instants.
pub fn duration_between<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> String {
    let total = (end.clone() - start.clone()).num_seconds().max(0);
    format!(
        "{:02}h : {:02}m : {:02}s",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Compact elapsed time for a running session.
pub fn format_elapsed(elapsed: u64) -> String {
    let hours = elapsed / 3600;
    let minutes = (elapsed % 3600) / 60;
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
