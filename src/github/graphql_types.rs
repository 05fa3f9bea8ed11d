//! Discussion GraphQL query, payload types, and normalization
//!
//! Discussions have no REST listing endpoint, so they are always fetched
//! per repository over GraphQL. This is the GraphQL half of the normalizer;
//! the REST half lives in `rest_types` and the two share no mapping code.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{BoardItem, ItemAuthor, ItemLabel, ItemState, ItemType};

/// Fixed query for the 20 most recently updated discussions of one
/// repository. Page size and the 10-label cap are not configurable; a
/// discussion with more labels is truncated silently.
pub const DISCUSSIONS_QUERY: &str = r#"
    query($owner: String!, $name: String!) {
        repository(owner: $owner, name: $name) {
            discussions(first: 20, orderBy: {field: UPDATED_AT, direction: DESC}) {
                nodes {
                    id
                    number
                    title
                    url
                    createdAt
                    updatedAt
                    closed
                    author {
                        login
                        avatarUrl
                    }
                    labels(first: 10) {
                        nodes {
                            name
                            color
                        }
                    }
                }
            }
        }
    }"#;

#[derive(Debug, Clone, Serialize)]
pub struct DiscussionsVariable {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionsResponse {
    pub repository: Option<DiscussionRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionRepository {
    pub discussions: DiscussionConnection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionConnection {
    pub nodes: Vec<DiscussionNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionNode {
    /// Opaque GraphQL global node identifier
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub closed: bool,
    pub author: Option<DiscussionAuthor>,
    pub labels: Option<DiscussionLabelConnection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionAuthor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionLabelConnection {
    pub nodes: Vec<DiscussionLabel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscussionLabel {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

static NON_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\D").expect("Failed to compile non-digit regex"));

/// Derives a numeric id from a GraphQL global node identifier by stripping
/// every non-digit character, defaulting to 0 when nothing parseable
/// remains. The result is not guaranteed unique; the original string
/// identifier stays on the item for callers that need true identity.
fn synthesize_numeric_id(node_id: &str) -> u64 {
    NON_DIGITS
        .replace_all(node_id, "")
        .parse::<u64>()
        .unwrap_or(0)
}

impl From<DiscussionNode> for BoardItem {
    fn from(node: DiscussionNode) -> Self {
        let labels = node
            .labels
            .map(|connection| {
                connection
                    .nodes
                    .into_iter()
                    .map(|label| ItemLabel {
                        name: label.name,
                        color: label.color.unwrap_or_else(|| "000000".to_string()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let user = node
            .author
            .map(|author| ItemAuthor {
                login: author.login,
                avatar_url: author.avatar_url,
            })
            .unwrap_or_default();

        BoardItem {
            id: synthesize_numeric_id(&node.id),
            number: node.number,
            title: node.title,
            state: if node.closed {
                ItemState::Closed
            } else {
                ItemState::Open
            },
            created_at: node.created_at,
            updated_at: node.updated_at,
            html_url: node.url,
            user,
            labels,
            repository: None,
            item_type: ItemType::Discussion,
            node_id: Some(node.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_id_strips_non_digits() {
        assert_eq!(synthesize_numeric_id("D_kwDOA12bc34"), 1234);
        assert_eq!(synthesize_numeric_id("node_12_34"), 1234);
    }

    #[test]
    fn test_numeric_id_defaults_to_zero_without_digits() {
        assert_eq!(synthesize_numeric_id("D_kwDOabc"), 0);
        assert_eq!(synthesize_numeric_id(""), 0);
    }

    #[test]
    fn test_discussion_node_converts_to_board_item() {
        let node: DiscussionNode = serde_json::from_value(json!({
            "id": "D_kwDOA77b1",
            "number": 5,
            "title": "Roadmap for Q3",
            "url": "https://github.com/acme/site/discussions/5",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z",
            "closed": false,
            "author": {"login": "maintainer", "avatarUrl": "https://avatars.example/m"},
            "labels": {"nodes": [{"name": "planning", "color": "0e8a16"}]}
        }))
        .unwrap();

        let item = BoardItem::from(node);

        assert_eq!(item.item_type, ItemType::Discussion);
        assert_eq!(item.state, ItemState::Open);
        assert_eq!(item.number, 5);
        assert_eq!(item.id, 771);
        assert_eq!(item.node_id.as_deref(), Some("D_kwDOA77b1"));
        assert_eq!(item.user.login, "maintainer");
        assert_eq!(item.labels[0].name, "planning");
    }

    #[test]
    fn test_closed_discussion_without_author() {
        let node: DiscussionNode = serde_json::from_value(json!({
            "id": "D_x9",
            "number": 2,
            "title": "Archived thread",
            "url": "https://github.com/acme/site/discussions/2",
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2023-06-01T00:00:00Z",
            "closed": true,
            "author": null,
            "labels": null
        }))
        .unwrap();

        let item = BoardItem::from(node);

        assert_eq!(item.state, ItemState::Closed);
        assert_eq!(item.user.login, "unknown");
        assert!(item.labels.is_empty());
    }
}
