use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Deps {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub license: String,
}

/// Third-party dependency listing shown on the info page.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DepInfo {
    #[serde(default)]
    pub frontend: Vec<Deps>,
    #[serde(default)]
    pub backend: Vec<Deps>,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PrivacyInfo {
    pub link: String,
    pub html: String,
}
