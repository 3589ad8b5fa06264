mod analysis;
mod envelope;
mod filter;
mod group;
mod info;
mod project;
mod tracked;
mod user;

pub use analysis::AnalysisData;
pub use envelope::Envelope;
pub use filter::{ExportFilter, ReportingWindow};
pub use group::{Group, GroupDetails, GroupToUser, IdTupel};
pub use info::{DepInfo, Deps, PrivacyInfo};
pub use project::{ArchiveId, Project, RefType, Start, UserProjects};
pub use tracked::{parse_timestamp, TrackedInterval};
pub use user::{AdminData, Login, PasswordReset, Role, User, UserApiToken, UserData};
