use serde::{Deserialize, Serialize};

use crate::models::{Project, TrackedInterval};

/// Raw activity for a reporting window: the projects involved and their tracked intervals.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub group_projects: Vec<Project>,
    #[serde(default)]
    pub tracked: Vec<TrackedInterval>,
}
