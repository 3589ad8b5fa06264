//! Typed Klukka API client crate used by the native app.

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod session;

pub use client::{KlukkaClient, Outcome};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use export::{filename_from_disposition, ExportFile, DEFAULT_EXPORT_FILENAME};
pub use models::{
    AdminData, AnalysisData, ArchiveId, DepInfo, Deps, Envelope, ExportFilter, Group,
    GroupDetails, GroupToUser, IdTupel, Login, PasswordReset, PrivacyInfo, Project, RefType,
    ReportingWindow, Role, Start, TrackedInterval, User, UserApiToken, UserData, UserProjects,
};
pub use session::{FnNavigator, KlukkaApi, LogNavigator, Navigator};
