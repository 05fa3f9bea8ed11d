//! Organization and repository metadata types

use serde::{Deserialize, Serialize};

/// Organization profile as returned by `GET /orgs/{org}`.
///
/// Only the fields the board and roadmap views consume; everything else in
/// the response is ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgInfo {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub public_repos: u64,
}
