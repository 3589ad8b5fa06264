//! Klukka time tracking client: activity aggregation and reporting on top of `klukka_api`.

pub mod activity;
pub mod cli;
pub mod config;
pub mod format;
pub mod report;
pub mod tracking;
pub mod window;

pub use activity::{
    build_custom_data, build_daily_data, build_monthly_data, build_series, build_weekly_data,
    bucketize, summarize, ActivitySummary, Bucket, BucketedSeries, ProjectTotal,
};
pub use config::{Config, ConfigManager};
pub use report::{build_report, load_report, ActivityReport};
pub use tracking::ActiveTracking;
pub use window::Preset;

/// Initializes `env_logger` with `info` as the default filter; `RUST_LOG` overrides it.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
