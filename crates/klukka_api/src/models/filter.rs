//! Reporting window and export filter payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time range queried for activity data, optionally scoped to a group.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl ReportingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            group_id: None,
        }
    }

    pub fn for_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExportFilter {
    pub filter: ReportingWindow,
    pub detailed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl ExportFilter {
    pub fn new(filter: ReportingWindow, detailed: bool) -> Self {
        Self {
            filter,
            detailed,
            group_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn group_id_is_omitted_when_absent() {
        let window = ReportingWindow::new(
            Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 12, 23, 59, 59).unwrap(),
        );
        let value = serde_json::to_value(&window).expect("serialize");
        assert!(value.get("groupId").is_none());

        let scoped = serde_json::to_value(window.for_group(4)).expect("serialize");
        assert_eq!(scoped["groupId"], 4);
    }
}
