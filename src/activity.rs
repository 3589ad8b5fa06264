//! Buckets tracked intervals per day and per project for stacked bar charts.
//!
//! Every mode shares [`bucketize`]: buckets are seeded for the whole window before any
//! interval is looked at, so the chart axis never has gaps. Intervals are attributed
//! entirely to the bucket of their start; a key that was not seeded is dropped.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use klukka_api::{Project, TrackedInterval};
use log::debug;
use serde::Serialize;

use crate::window::{days_of_month, Preset};

pub const PROJECT_KEY_PREFIX: &str = "Project";
pub const UNKNOWN_PROJECT: &str = "Unknown";

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Chart data key for a project, e.g. `Project5`.
pub fn project_key(project_id: i64) -> String {
    format!("{PROJECT_KEY_PREFIX}{project_id}")
}

pub fn project_id_from_key(key: &str) -> Option<i64> {
    key.strip_prefix(PROJECT_KEY_PREFIX)?.parse().ok()
}

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

/// One reporting period with accumulated minutes per project key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub name: String,
    #[serde(flatten)]
    pub projects: BTreeMap<String, f64>,
}

impl Bucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            projects: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, project_id: i64, minutes: f64) {
        *self.projects.entry(project_key(project_id)).or_insert(0.0) += minutes;
    }

    pub fn minutes_for(&self, project_id: i64) -> f64 {
        self.projects
            .get(&project_key(project_id))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.projects.values().sum()
    }
}

/// Buckets in axis order. Serializes as a flat array of chart rows.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(transparent)]
pub struct BucketedSeries {
    buckets: Vec<Bucket>,
}

impl BucketedSeries {
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| bucket.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    /// Axis extent: the busiest bucket rounded up to whole hours, never below one hour.
    pub fn max_minutes(&self) -> i64 {
        let busiest = self
            .buckets
            .iter()
            .map(Bucket::total)
            .fold(0.0_f64, f64::max);
        let hours = (busiest / 60.0).ceil() as i64;
        60 * hours.max(1)
    }

    /// Hourly tick marks from zero up to [`Self::max_minutes`].
    pub fn ticks(&self) -> Vec<i64> {
        (0..=self.max_minutes()).step_by(60).collect()
    }
}

/// Seeds buckets in order, then adds each interval's minutes to the bucket `key_of` selects.
///
/// Duplicate seed keys keep the first label. Running intervals count up to `now`.
pub fn bucketize<K, F>(
    intervals: &[TrackedInterval],
    seeds: impl IntoIterator<Item = (K, String)>,
    now: DateTime<Utc>,
    key_of: F,
) -> BucketedSeries
where
    K: Eq + Hash,
    F: Fn(&TrackedInterval) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut buckets = Vec::new();
    for (key, label) in seeds {
        slots.entry(key).or_insert_with(|| {
            buckets.push(Bucket::new(label));
            buckets.len() - 1
        });
    }

    for interval in intervals {
        match slots.get(&key_of(interval)) {
            Some(&slot) => buckets[slot].add(interval.project_id, interval.minutes(now)),
            None => debug!(
                "interval {} starting {} is outside the reporting window",
                interval.id, interval.start
            ),
        }
    }

    BucketedSeries { buckets }
}

/// A single bucket named after today's weekday; every interval counts towards it.
pub fn build_daily_data<Tz: TimeZone>(
    intervals: &[TrackedInterval],
    now: &DateTime<Tz>,
) -> BucketedSeries {
    let label = weekday_name(now.weekday()).to_string();
    bucketize(intervals, [((), label)], now.with_timezone(&Utc), |_| ())
}

/// Seven buckets, Monday through Sunday, keyed by the weekday an interval starts on.
pub fn build_weekly_data<Tz: TimeZone>(
    intervals: &[TrackedInterval],
    now: &DateTime<Tz>,
) -> BucketedSeries {
    let tz = now.timezone();
    let seeds = WEEK.iter().map(|day| (*day, weekday_name(*day).to_string()));
    bucketize(intervals, seeds, now.with_timezone(&Utc), |interval| {
        interval.start.with_timezone(&tz).weekday()
    })
}

/// One bucket per day of the current month, labelled like `6. January`.
pub fn build_monthly_data<Tz: TimeZone>(
    intervals: &[TrackedInterval],
    now: &DateTime<Tz>,
) -> BucketedSeries {
    let tz = now.timezone();
    let seeds = days_of_month(now.date_naive()).into_iter().map(|date| {
        let label = format!("{}. {}", date.day(), MONTHS[date.month0() as usize]);
        (date.day(), label)
    });
    bucketize(intervals, seeds, now.with_timezone(&Utc), |interval| {
        interval.start.with_timezone(&tz).day()
    })
}

/// One bucket per calendar day reached by stepping whole days from `start` while not past `end`.
///
/// Intervals starting on a day outside that list contribute nothing.
pub fn build_custom_data<Tz: TimeZone>(
    intervals: &[TrackedInterval],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: &DateTime<Tz>,
) -> BucketedSeries {
    let tz = now.timezone();
    let mut days: Vec<NaiveDate> = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        days.push(cursor.with_timezone(&tz).date_naive());
        cursor += Duration::days(1);
    }

    let seeds = days
        .into_iter()
        .map(|date| (date, date.format("%Y-%m-%d").to_string()));
    bucketize(intervals, seeds, now.with_timezone(&Utc), |interval| {
        interval.start.with_timezone(&tz).date_naive()
    })
}

/// Builds the series for `preset`; `Custom` uses the window bounds.
pub fn build_series<Tz: TimeZone>(
    preset: Preset,
    intervals: &[TrackedInterval],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: &DateTime<Tz>,
) -> BucketedSeries {
    match preset {
        Preset::Today => build_daily_data(intervals, now),
        Preset::Week => build_weekly_data(intervals, now),
        Preset::Month => build_monthly_data(intervals, now),
        Preset::Custom => build_custom_data(intervals, start, end, now),
    }
}

pub fn project_title(projects: &[Project], project_id: i64) -> &str {
    projects
        .iter()
        .find(|project| project.id == project_id)
        .map(|project| project.title.as_str())
        .unwrap_or(UNKNOWN_PROJECT)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotal {
    pub id: i64,
    pub name: String,
    pub minutes: f64,
}

/// Detail table under the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ActivitySummary {
    pub total_minutes: f64,
    pub projects: Vec<ProjectTotal>,
}

impl ActivitySummary {
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

/// Per-project totals over all intervals, busiest first.
pub fn summarize(
    intervals: &[TrackedInterval],
    projects: &[Project],
    now: DateTime<Utc>,
) -> ActivitySummary {
    let mut totals: Vec<ProjectTotal> = Vec::new();
    for interval in intervals {
        let minutes = interval.minutes(now);
        match totals.iter_mut().find(|total| total.id == interval.project_id) {
            Some(total) => total.minutes += minutes,
            None => totals.push(ProjectTotal {
                id: interval.project_id,
                name: project_title(projects, interval.project_id).to_string(),
                minutes,
            }),
        }
    }
    totals.sort_by(|a, b| b.minutes.total_cmp(&a.minutes));

    ActivitySummary {
        total_minutes: totals.iter().map(|total| total.minutes).sum(),
        projects: totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use klukka_api::RefType;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn interval(
        id: i64,
        project_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> TrackedInterval {
        TrackedInterval {
            id,
            user: 1,
            project_id,
            start,
            end: Some(end),
            timezone: "UTC".to_string(),
            active: false,
        }
    }

    fn project(id: i64, title: &str) -> Project {
        Project {
            id,
            owner_ref: 1,
            ref_type: RefType::User,
            title: title.to_string(),
            description: String::new(),
            color: "#4DA4E6".to_string(),
            archived: false,
            tracked_this_month: 0,
        }
    }

    #[test]
    fn daily_without_intervals_has_single_empty_bucket() {
        // Wednesday
        let now = at(2025, 1, 8, 12, 0);
        let series = build_daily_data(&[], &now);
        assert_eq!(series.len(), 1);
        assert_eq!(series.buckets()[0].name, "Wednesday");
        assert!(series.buckets()[0].projects.is_empty());
    }

    #[test]
    fn daily_attributes_every_interval_to_today() {
        let now = at(2025, 1, 8, 12, 0);
        let intervals = [
            interval(1, 5, at(2025, 1, 8, 9, 0), at(2025, 1, 8, 9, 30)),
            interval(2, 5, at(2025, 1, 7, 23, 30), at(2025, 1, 8, 0, 15)),
        ];
        let series = build_daily_data(&intervals, &now);
        assert_eq!(series.len(), 1);
        assert_eq!(series.buckets()[0].minutes_for(5), 75.0);
    }

    #[test]
    fn weekly_without_intervals_has_seven_ordered_buckets() {
        let series = build_weekly_data(&[], &at(2025, 1, 8, 12, 0));
        let names: Vec<&str> = series.iter().map(|bucket| bucket.name.as_str()).collect();
        assert_eq!(names, WEEKDAYS.to_vec());
        assert!(series.iter().all(|bucket| bucket.projects.is_empty()));
    }

    #[test]
    fn weekly_accumulates_minutes_on_start_weekday() {
        let intervals = [interval(1, 5, at(2025, 1, 6, 9, 0), at(2025, 1, 6, 10, 30))];
        let series = build_weekly_data(&intervals, &at(2025, 1, 8, 12, 0));

        let monday = series.get("Monday").expect("monday bucket");
        assert_eq!(monday.projects.get("Project5"), Some(&90.0));
        assert_eq!(series.get("Tuesday").map(Bucket::total), Some(0.0));
    }

    #[test]
    fn weekly_sums_multiple_projects_and_sessions() {
        let intervals = [
            interval(1, 5, at(2025, 1, 6, 9, 0), at(2025, 1, 6, 10, 0)),
            interval(2, 5, at(2025, 1, 6, 13, 0), at(2025, 1, 6, 13, 30)),
            interval(3, 7, at(2025, 1, 6, 14, 0), at(2025, 1, 6, 14, 45)),
        ];
        let series = build_weekly_data(&intervals, &at(2025, 1, 8, 12, 0));
        let monday = series.get("Monday").expect("monday bucket");
        assert_eq!(monday.minutes_for(5), 90.0);
        assert_eq!(monday.minutes_for(7), 45.0);
        assert_eq!(monday.total(), 135.0);
    }

    #[test]
    fn interval_crossing_midnight_stays_in_start_bucket() {
        let intervals = [interval(1, 5, at(2025, 1, 6, 23, 30), at(2025, 1, 7, 0, 30))];
        let series = build_weekly_data(&intervals, &at(2025, 1, 8, 12, 0));
        assert_eq!(series.get("Monday").map(|b| b.minutes_for(5)), Some(60.0));
        assert_eq!(series.get("Tuesday").map(Bucket::total), Some(0.0));
    }

    #[test]
    fn weekday_follows_reporting_time_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = plus_two.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
        // Sunday 23:30 UTC is Monday 01:30 at +02:00
        let intervals = [interval(1, 5, at(2025, 1, 5, 23, 30), at(2025, 1, 6, 0, 0))];
        let series = build_weekly_data(&intervals, &now);
        assert_eq!(series.get("Monday").map(|b| b.minutes_for(5)), Some(30.0));
        assert_eq!(series.get("Sunday").map(Bucket::total), Some(0.0));
    }

    #[test]
    fn monthly_seeds_every_day_with_labels() {
        let intervals = [interval(1, 5, at(2025, 1, 6, 9, 0), at(2025, 1, 6, 10, 0))];
        let series = build_monthly_data(&intervals, &at(2025, 1, 20, 12, 0));
        assert_eq!(series.len(), 31);
        assert_eq!(series.buckets()[0].name, "1. January");
        assert_eq!(series.buckets()[5].name, "6. January");
        assert_eq!(series.buckets()[5].minutes_for(5), 60.0);
    }

    #[test]
    fn monthly_drops_days_the_month_does_not_have() {
        let intervals = [interval(1, 5, at(2025, 1, 31, 9, 0), at(2025, 1, 31, 10, 0))];
        let series = build_monthly_data(&intervals, &at(2025, 2, 10, 12, 0));
        assert_eq!(series.len(), 28);
        assert!(series.iter().all(|bucket| bucket.projects.is_empty()));
    }

    #[test]
    fn custom_range_seeds_each_day_inclusive() {
        let now = at(2025, 1, 20, 12, 0);
        let end = at(2025, 1, 9, 0, 0) - Duration::milliseconds(1);
        let series = build_custom_data(&[], at(2025, 1, 6, 0, 0), end, &now);
        let names: Vec<&str> = series.iter().map(|bucket| bucket.name.as_str()).collect();
        assert_eq!(names, vec!["2025-01-06", "2025-01-07", "2025-01-08"]);
    }

    #[test]
    fn custom_range_drops_intervals_outside_bounds() {
        let now = at(2025, 1, 20, 12, 0);
        let end = at(2025, 1, 8, 0, 0) - Duration::milliseconds(1);
        let intervals = [
            interval(1, 5, at(2025, 1, 5, 22, 0), at(2025, 1, 6, 1, 0)),
            interval(2, 5, at(2025, 1, 7, 9, 0), at(2025, 1, 7, 9, 20)),
            interval(3, 6, at(2025, 1, 8, 9, 0), at(2025, 1, 8, 11, 0)),
        ];
        let series = build_custom_data(&intervals, at(2025, 1, 6, 0, 0), end, &now);

        assert_eq!(series.len(), 2);
        assert_eq!(series.get("2025-01-06").map(Bucket::total), Some(0.0));
        assert_eq!(series.get("2025-01-07").map(|b| b.minutes_for(5)), Some(20.0));
        assert!(series.iter().all(|bucket| bucket.minutes_for(6) == 0.0));
    }

    #[test]
    fn running_interval_counts_up_to_now() {
        let mut running = interval(1, 5, at(2025, 1, 8, 11, 0), at(2025, 1, 8, 11, 0));
        running.end = None;
        running.active = true;
        let series = build_daily_data(&[running], &at(2025, 1, 8, 12, 0));
        assert_eq!(series.buckets()[0].minutes_for(5), 60.0);
    }

    #[test]
    fn max_minutes_has_one_hour_floor() {
        let series = build_weekly_data(&[], &at(2025, 1, 8, 12, 0));
        assert_eq!(series.max_minutes(), 60);
        assert_eq!(series.ticks(), vec![0, 60]);
    }

    #[test]
    fn max_minutes_rounds_busiest_bucket_up_to_hours() {
        let intervals = [
            interval(1, 5, at(2025, 1, 6, 9, 0), at(2025, 1, 6, 10, 30)),
            interval(2, 7, at(2025, 1, 6, 11, 0), at(2025, 1, 6, 11, 31)),
            interval(3, 7, at(2025, 1, 7, 9, 0), at(2025, 1, 7, 11, 0)),
        ];
        let series = build_weekly_data(&intervals, &at(2025, 1, 8, 12, 0));
        assert_eq!(series.max_minutes(), 180);
        assert_eq!(series.ticks(), vec![0, 60, 120, 180]);
    }

    #[test]
    fn series_serializes_as_flat_chart_rows() {
        let intervals = [interval(1, 5, at(2025, 1, 6, 9, 0), at(2025, 1, 6, 10, 30))];
        let series = build_weekly_data(&intervals, &at(2025, 1, 8, 12, 0));
        let value = serde_json::to_value(&series).expect("serialize");
        assert_eq!(value[0], json!({ "name": "Monday", "Project5": 90.0 }));
        assert_eq!(value[6], json!({ "name": "Sunday" }));
    }

    #[test]
    fn project_keys_round_trip_for_legend_lookup() {
        assert_eq!(project_key(12), "Project12");
        assert_eq!(project_id_from_key("Project12"), Some(12));
        assert_eq!(project_id_from_key("name"), None);
    }

    #[test]
    fn summary_sorts_projects_by_duration() {
        let projects = [project(5, "Klukka"), project(7, "Website")];
        let intervals = [
            interval(1, 5, at(2025, 1, 6, 9, 0), at(2025, 1, 6, 9, 30)),
            interval(2, 7, at(2025, 1, 6, 10, 0), at(2025, 1, 6, 12, 0)),
            interval(3, 9, at(2025, 1, 7, 10, 0), at(2025, 1, 7, 10, 45)),
            interval(4, 5, at(2025, 1, 7, 13, 0), at(2025, 1, 7, 13, 30)),
        ];
        let summary = summarize(&intervals, &projects, at(2025, 1, 8, 12, 0));

        let order: Vec<(&str, f64)> = summary
            .projects
            .iter()
            .map(|total| (total.name.as_str(), total.minutes))
            .collect();
        assert_eq!(order, vec![("Website", 120.0), ("Klukka", 60.0), ("Unknown", 45.0)]);
        assert_eq!(summary.total_minutes, 225.0);
        assert_eq!(summary.project_count(), 3);
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        let summary = summarize(&[], &[], at(2025, 1, 8, 12, 0));
        assert_eq!(summary, ActivitySummary::default());
    }
}
