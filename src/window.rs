//! Reporting window presets and back/next navigation.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use klukka_api::ReportingWindow;
use serde::{Deserialize, Serialize};

/// Which period the activity view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Today,
    Week,
    Month,
    Custom,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Preset::Today => "today",
            Preset::Week => "week",
            Preset::Month => "month",
            Preset::Custom => "custom",
        };
        f.write_str(label)
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" | "day" => Ok(Preset::Today),
            "week" => Ok(Preset::Week),
            "month" => Ok(Preset::Month),
            "custom" => Ok(Preset::Custom),
            other => Err(format!("unknown preset `{other}`")),
        }
    }
}

/// Resolves a local wall-clock time, taking the earliest instant when ambiguous.
pub fn to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

fn local_window<Tz: TimeZone>(tz: &Tz, from: NaiveDate, to: NaiveDate) -> ReportingWindow {
    ReportingWindow::new(to_utc(tz, start_of_day(from)), to_utc(tz, end_of_day(to)))
}

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Every calendar day of the month containing `date`, in order.
pub fn days_of_month(date: NaiveDate) -> Vec<NaiveDate> {
    let first = date - Days::new(u64::from(date.day0()));
    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .collect()
}

pub fn day_window<Tz: TimeZone>(now: &DateTime<Tz>) -> ReportingWindow {
    let today = now.date_naive();
    local_window(&now.timezone(), today, today)
}

/// Monday 00:00 through Sunday 23:59:59.999 of the current week.
pub fn week_window<Tz: TimeZone>(now: &DateTime<Tz>) -> ReportingWindow {
    let monday = start_of_week(now.date_naive());
    local_window(&now.timezone(), monday, monday + Days::new(6))
}

pub fn month_window<Tz: TimeZone>(now: &DateTime<Tz>) -> ReportingWindow {
    let today = now.date_naive();
    let days = days_of_month(today);
    let first = days.first().copied().unwrap_or(today);
    let last = days.last().copied().unwrap_or(today);
    local_window(&now.timezone(), first, last)
}

/// Start of `from` through end of `to`, both read in `tz`.
pub fn custom_window<Tz: TimeZone>(tz: &Tz, from: NaiveDate, to: NaiveDate) -> ReportingWindow {
    local_window(tz, from, to)
}

/// Window for a preset. `Custom` has no bounds of its own and falls back to today.
pub fn window_for<Tz: TimeZone>(preset: Preset, now: &DateTime<Tz>) -> ReportingWindow {
    match preset {
        Preset::Today | Preset::Custom => day_window(now),
        Preset::Week => week_window(now),
        Preset::Month => month_window(now),
    }
}

/// Moves both bounds by whole days; the result is shown as a custom range.
pub fn shift_days(window: &ReportingWindow, days: i64) -> ReportingWindow {
    ReportingWindow {
        start: window.start + Duration::days(days),
        end: window.end + Duration::days(days),
        group_id: window.group_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn day_window_covers_whole_day() {
        let now = utc(2025, 1, 8, 14, 30, 0);
        let window = day_window(&now);
        assert_eq!(window.start, utc(2025, 1, 8, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 9, 0, 0, 0) - Duration::milliseconds(1));
        assert!(window.group_id.is_none());
    }

    #[test]
    fn week_window_starts_on_monday() {
        // Sunday
        let now = utc(2025, 1, 12, 10, 0, 0);
        let window = week_window(&now);
        assert_eq!(window.start, utc(2025, 1, 6, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 13, 0, 0, 0) - Duration::milliseconds(1));

        let monday = utc(2025, 1, 6, 0, 0, 0);
        assert_eq!(week_window(&monday).start, monday);
    }

    #[test]
    fn month_window_spans_calendar_month() {
        let now = utc(2024, 2, 14, 8, 0, 0);
        let window = month_window(&now);
        assert_eq!(window.start, utc(2024, 2, 1, 0, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 1, 0, 0, 0) - Duration::milliseconds(1));
        assert_eq!(days_of_month(now.date_naive()).len(), 29);
    }

    #[test]
    fn local_offset_shifts_utc_bounds() {
        let berlin = FixedOffset::east_opt(3600).unwrap();
        let now = berlin.with_ymd_and_hms(2025, 1, 8, 0, 30, 0).unwrap();
        let window = day_window(&now);
        assert_eq!(window.start, utc(2025, 1, 7, 23, 0, 0));
    }

    #[test]
    fn custom_window_spans_inclusive_dates() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 8).unwrap();
        let window = custom_window(&Utc, from, to);
        assert_eq!(window.start, utc(2025, 1, 6, 0, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 9, 0, 0, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn shift_moves_both_bounds() {
        let window = day_window(&utc(2025, 1, 8, 12, 0, 0)).for_group(2);
        let back = shift_days(&window, -1);
        assert_eq!(back.start, utc(2025, 1, 7, 0, 0, 0));
        assert_eq!(back.end - back.start, window.end - window.start);
        assert_eq!(back.group_id, Some(2));
    }

    #[test]
    fn custom_preset_falls_back_to_today() {
        let now = utc(2025, 1, 8, 12, 0, 0);
        assert_eq!(window_for(Preset::Custom, &now), day_window(&now));
        assert_eq!(window_for(Preset::Week, &now), week_window(&now));
    }

    #[test]
    fn preset_parses_case_insensitively() {
        assert_eq!("Week".parse::<Preset>(), Ok(Preset::Week));
        assert_eq!("day".parse::<Preset>(), Ok(Preset::Today));
        assert!("year".parse::<Preset>().is_err());
        assert_eq!(Preset::Month.to_string(), "month");
    }
}
