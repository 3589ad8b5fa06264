use serde::{Deserialize, Serialize};

use crate::models::{Project, User};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub owner: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupDetails {
    pub group: Group,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupToUser {
    pub group_id: i64,
    pub mail: String,
}

/// Pair of ids, used for group/project links.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct IdTupel {
    pub id1: i64,
    pub id2: i64,
}
