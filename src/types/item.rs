//! Unified board item types
//!
//! A [`BoardItem`] is the canonical representation of an issue, pull
//! request, or discussion. The three source schemas differ substantially;
//! the conversions in `github::rest_types` and `github::graphql_types` are
//! the only places where those differences are resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of resource a board item was produced from.
///
/// Fixed at creation by the fetch path and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Produced by the issue fetch path
    Issue,
    /// Produced by the pull request fetch path
    Pr,
    /// Produced by the GraphQL discussion fetch path
    Discussion,
}

/// Open/closed state of a board item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

/// State selector for fetch operations.
///
/// `All` is a request-side concept only: the search query builder omits the
/// `is:<state>` qualifier entirely for it, and the repository list endpoints
/// pass it through as `state=all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    Open,
    Closed,
    All,
}

/// Type selector for the aggregate fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    All,
    Issue,
    Pr,
    Discussion,
}

impl TypeFilter {
    /// Whether items of the given type pass this filter.
    pub fn includes(self, item_type: ItemType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Issue => item_type == ItemType::Issue,
            TypeFilter::Pr => item_type == ItemType::Pr,
            TypeFilter::Discussion => item_type == ItemType::Discussion,
        }
    }
}

/// Author of a board item.
///
/// Defaults to `{login: "unknown", avatar_url: ""}` when the source author
/// is absent, e.g. a deleted account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAuthor {
    pub login: String,
    pub avatar_url: String,
}

impl Default for ItemAuthor {
    fn default() -> Self {
        Self {
            login: "unknown".to_string(),
            avatar_url: String::new(),
        }
    }
}

/// Label attached to a board item.
///
/// `color` falls back to `"000000"` when the source label carries no color,
/// which happens for the bare-string label form some REST responses use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLabel {
    pub name: String,
    pub color: String,
}

/// Canonical representation of an issue, pull request, or discussion.
///
/// Value object with no back-references; freely cloned and shared. The
/// `repository` field holds the short repository name (not `org/repo`) and
/// is always populated for items produced by a per-repository fetch, but may
/// be absent for org-wide search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardItem {
    /// Numeric identifier. For discussions this is synthesized from the
    /// GraphQL node identifier and must not be relied on for uniqueness;
    /// `node_id` carries the authoritative identifier in that case.
    pub id: u64,
    /// Repository-scoped issue/PR/discussion number
    pub number: u64,
    pub title: String,
    pub state: ItemState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub user: ItemAuthor,
    pub labels: Vec<ItemLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Original GraphQL node identifier, present only for discussions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}
