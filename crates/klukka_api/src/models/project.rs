use serde::{Deserialize, Serialize};

/// Whether a project is owned by a single user or by a group.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RefType {
    #[default]
    User,
    Group,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    /// Owning user or group id, disambiguated by `ref_type`.
    #[serde(rename = "ref")]
    pub owner_ref: i64,
    pub ref_type: RefType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tracked_this_month: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserProjects {
    #[serde(default)]
    pub own: Vec<Project>,
    #[serde(default)]
    pub group: Vec<Project>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveId {
    pub project_id: i64,
    pub archive: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Start {
    #[serde(rename = "projectID")]
    pub project_id: i64,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}
