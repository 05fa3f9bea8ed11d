//! Raw REST payload types and their normalization into board items
//!
//! The REST side of the normalizer lives here. Field names and nesting
//! differ entirely from the GraphQL discussion schema, so the two sides
//! share no mapping code; see `graphql_types` for the other half.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::types::{BoardItem, ItemAuthor, ItemLabel, ItemState, ItemType};

const DEFAULT_LABEL_COLOR: &str = "000000";

/// Author object as the REST API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RestUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl From<RestUser> for ItemAuthor {
    fn from(user: RestUser) -> Self {
        Self {
            login: user.login,
            avatar_url: user.avatar_url,
        }
    }
}

/// Label in either of the two forms REST responses use: a full object or a
/// bare name string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RestLabel {
    Object {
        name: String,
        #[serde(default)]
        color: Option<String>,
    },
    Bare(String),
}

impl From<RestLabel> for ItemLabel {
    fn from(label: RestLabel) -> Self {
        match label {
            RestLabel::Object { name, color } => Self {
                name,
                color: color.unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
            },
            RestLabel::Bare(name) => Self {
                name,
                color: DEFAULT_LABEL_COLOR.to_string(),
            },
        }
    }
}

/// Nested repository object, present on some list responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RestRepoRef {
    pub name: String,
}

/// Issue-shaped payload returned by the issues list, the pulls list, and
/// the search API.
///
/// The issues list endpoint also returns pull requests; those entries carry
/// a `pull_request` marker and are filtered out before normalization so the
/// issue fetch path never double-counts PRs.
#[derive(Debug, Clone, Deserialize)]
pub struct RestItem {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    #[serde(default)]
    pub user: Option<RestUser>,
    #[serde(default)]
    pub labels: Vec<RestLabel>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub repository: Option<RestRepoRef>,
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl RestItem {
    /// Normalizes the raw payload into a board item of the given type.
    ///
    /// The short repository name is taken from the last path segment of
    /// `repository_url` when present, then from the nested repository
    /// object. Per-repository fetch paths overwrite it with the repository
    /// they queried, so the fallbacks only matter for search results.
    pub fn into_board_item(self, item_type: ItemType) -> BoardItem {
        let repository = self
            .repository_url
            .as_deref()
            .and_then(|url| url.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .or(self.repository.map(|repo| repo.name));

        BoardItem {
            id: self.id,
            number: self.number,
            title: self.title,
            state: parse_state(&self.state),
            created_at: self.created_at,
            updated_at: self.updated_at,
            html_url: self.html_url,
            user: self.user.map(ItemAuthor::from).unwrap_or_default(),
            labels: self.labels.into_iter().map(ItemLabel::from).collect(),
            repository,
            item_type,
            node_id: None,
        }
    }
}

// Anything the API reports that is not literally "open" counts as closed.
fn parse_state(state: &str) -> ItemState {
    if state == "open" {
        ItemState::Open
    } else {
        ItemState::Closed
    }
}

/// Envelope returned by the search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults<T> {
    #[serde(default)]
    pub total_count: u64,
    pub items: Vec<T>,
}

/// Repository entry from the repository search API.
#[derive(Debug, Clone, Deserialize)]
pub struct RestRepo {
    pub name: String,
}

/// Payload of `GET /repos/{org}/{repo}/readme`.
#[derive(Debug, Clone, Deserialize)]
pub struct RestReadme {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: Option<String>,
}
