//! Fetches activity for a window and turns it into chart and table data.

use chrono::{DateTime, TimeZone, Utc};
use klukka_api::{AnalysisData, KlukkaApi, Navigator, Project, ReportingWindow, Result};
use log::info;
use serde::Serialize;

use crate::activity::{build_series, summarize, ActivitySummary, BucketedSeries};
use crate::format::{axis_label, minutes_to_string};
use crate::window::Preset;

#[derive(Debug, Clone, Serialize)]
pub struct ActivityReport {
    pub preset: Preset,
    pub window: ReportingWindow,
    pub projects: Vec<Project>,
    pub series: BucketedSeries,
    pub summary: ActivitySummary,
}

impl ActivityReport {
    /// Plain text rendering: one line per bucket, then the detail table.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} report {} .. {} (axis 0..{})",
            self.preset,
            self.window.start.format("%Y-%m-%d %H:%M"),
            self.window.end.format("%Y-%m-%d %H:%M"),
            axis_label(self.series.max_minutes())
        )];

        for bucket in self.series.iter() {
            let parts: Vec<String> = self
                .summary
                .projects
                .iter()
                .filter_map(|total| {
                    let minutes = bucket.minutes_for(total.id);
                    (minutes > 0.0)
                        .then(|| format!("{} {}", total.name, minutes_to_string(minutes)))
                })
                .collect();
            lines.push(format!("{:<12} {}", bucket.name, parts.join(", ")));
        }

        lines.push(format!(
            "Overall time tracked: {}",
            minutes_to_string(self.summary.total_minutes)
        ));
        lines.push(format!("Nr of Projects worked on: {}", self.summary.project_count()));
        for total in &self.summary.projects {
            lines.push(format!("  {:<24} {}", total.name, minutes_to_string(total.minutes)));
        }
        lines
    }
}

/// Assembles a report from already fetched data. Group reports only list group projects.
pub fn build_report<Tz: TimeZone>(
    data: AnalysisData,
    preset: Preset,
    window: ReportingWindow,
    now: &DateTime<Tz>,
) -> ActivityReport {
    let AnalysisData {
        projects,
        group_projects,
        tracked,
    } = data;
    let projects = if window.group_id.is_some() {
        group_projects
    } else {
        projects.into_iter().chain(group_projects).collect()
    };

    let series = build_series(preset, &tracked, window.start, window.end, now);
    let summary = summarize(&tracked, &projects, now.with_timezone(&Utc));
    ActivityReport {
        preset,
        window,
        projects,
        series,
        summary,
    }
}

/// Fetches personal or group activity for `window` and builds the report.
pub async fn load_report<N, Tz>(
    api: &KlukkaApi<N>,
    preset: Preset,
    window: ReportingWindow,
    group_id: Option<i64>,
    now: &DateTime<Tz>,
) -> Result<Option<ActivityReport>>
where
    N: Navigator,
    Tz: TimeZone,
{
    let window = match group_id {
        Some(id) => window.for_group(id),
        None => window,
    };
    let data = if window.group_id.is_some() {
        api.group_analysis_data(&window).await?
    } else {
        api.analysis_data(&window).await?
    };

    Ok(data.map(|data| {
        info!("loaded {} tracked intervals for {preset} report", data.tracked.len());
        build_report(data, preset, window, now)
    }))
}
