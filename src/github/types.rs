// src/github/types.rs
// Wire records as the GitHub REST API returns them. Only the fields
// the pipeline consumes are declared; everything else is ignored.

use serde::{Deserialize, Serialize};

/// One entry of `GET /repos/{repo}/contributors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContributor {
    pub login: String,
    pub html_url: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub contributions: u64,
}

/// One entry of `GET /orgs/{org}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMember {
    pub login: String,
    pub html_url: String,
}

/// `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}
