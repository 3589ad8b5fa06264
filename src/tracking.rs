//! Snapshot of the session that is currently being tracked.

use chrono::{DateTime, Utc};
use klukka_api::TrackedInterval;
use serde::Serialize;

use crate::format::format_elapsed;

/// The running interval as last reported by the backend, with its project title.
#[derive(Clone, Serialize, Debug)]
pub struct ActiveTracking {
    pub interval: TrackedInterval,
    pub title: String,
}

impl ActiveTracking {
    pub fn new(interval: TrackedInterval, title: impl Into<String>) -> Self {
        Self {
            interval,
            title: title.into(),
        }
    }

    /// Seconds since the session started; zero if the start lies in the future.
    pub fn elapsed(&self, now: DateTime<Utc>) -> u64 {
        let seconds = (now - self.interval.start).num_seconds();
        u64::try_from(seconds).unwrap_or(0)
    }

    /// `"<h>H <m>m"` as shown on the running timer.
    pub fn display(&self, now: DateTime<Utc>) -> String {
        let elapsed = self.elapsed(now);
        format!("{}H {}m", elapsed / 3600, (elapsed % 3600) / 60)
    }

    pub fn summary(&self, now: DateTime<Utc>) -> String {
        format!("{} ({})", self.title, format_elapsed(self.elapsed(now)))
    }

    /// True when a fresh poll shows the session was stopped or replaced elsewhere.
    pub fn is_superseded_by(&self, polled: Option<&TrackedInterval>) -> bool {
        match polled {
            Some(current) => current.id != self.interval.id,
            None => true,
        }
    }
}
