//! Fetch orchestration for board items and repository metadata
//!
//! Every public fetcher degrades to an empty result (or `None` for singular
//! lookups) instead of propagating errors: a transient GitHub outage should
//! degrade the board, not crash it. Failures are logged with their
//! repository context so silent degradation stays visible to operators.
//! Per-repository loops additionally catch at each iteration, so one bad
//! repository never aborts the rest of the batch.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::warn;

use crate::config::BoardConfig;
use crate::github::GitHubClient;
use crate::github::error::ApiError;
use crate::github::graphql_types::{DISCUSSIONS_QUERY, DiscussionsResponse, DiscussionsVariable};
use crate::github::rest_types::{RestItem, RestReadme, RestRepo, SearchResults};
use crate::github::search::{
    SearchTarget, build_search_query, issue_search_endpoint, repo_items_endpoint,
    repo_search_endpoint,
};
use crate::types::{BoardItem, ItemType, OrgInfo, StateFilter};

/// Drops items authored by an excluded login, matched case-insensitively.
pub fn filter_by_user(items: Vec<BoardItem>, excluded_users: &[String]) -> Vec<BoardItem> {
    if excluded_users.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            !excluded_users
                .iter()
                .any(|login| login.eq_ignore_ascii_case(&item.user.login))
        })
        .collect()
}

/// Coordinates the per-type fetch paths against one GitHub client.
///
/// Configuration is injected at construction and never mutated; the client
/// owns the response cache, so all fetchers share one TTL window.
pub struct BoardFetcher {
    client: GitHubClient,
    config: BoardConfig,
}

impl BoardFetcher {
    pub fn new(client: GitHubClient, config: BoardConfig) -> Self {
        Self { client, config }
    }

    /// Builds a fetcher with a client authenticated from the configuration.
    pub fn from_config(config: BoardConfig) -> anyhow::Result<Self> {
        let client = GitHubClient::new(config.token.clone())?;
        Ok(Self::new(client, config))
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Fetches issues for the organization.
    ///
    /// With a repository allow-list, issues are listed per repository and
    /// tagged with their source directly, avoiding the search API's
    /// eventual-consistency lag and rate-limit cost. Without one, a single
    /// org-wide search request is used instead.
    pub async fn fetch_issues(
        &self,
        org: &str,
        state: StateFilter,
        allowed_repos: &[String],
    ) -> Vec<BoardItem> {
        match self.fetch_items(org, state, allowed_repos, SearchTarget::Issues).await {
            Ok(items) => filter_by_user(items, &self.config.excluded_users),
            Err(e) => {
                warn!(org, error = %e, "issue fetch failed, returning no issues");
                Vec::new()
            }
        }
    }

    /// Fetches pull requests for the organization, with the same dual
    /// strategy as [`fetch_issues`](Self::fetch_issues).
    pub async fn fetch_pull_requests(
        &self,
        org: &str,
        state: StateFilter,
        allowed_repos: &[String],
    ) -> Vec<BoardItem> {
        match self
            .fetch_items(org, state, allowed_repos, SearchTarget::PullRequests)
            .await
        {
            Ok(items) => filter_by_user(items, &self.config.excluded_users),
            Err(e) => {
                warn!(org, error = %e, "pull request fetch failed, returning no pull requests");
                Vec::new()
            }
        }
    }

    async fn fetch_items(
        &self,
        org: &str,
        state: StateFilter,
        allowed_repos: &[String],
        target: SearchTarget,
    ) -> Result<Vec<BoardItem>, ApiError> {
        let item_type = match target {
            SearchTarget::Issues => ItemType::Issue,
            SearchTarget::PullRequests => ItemType::Pr,
        };

        if allowed_repos.is_empty() {
            // Org-wide search has no per-repository granularity; a failure
            // here fails the whole fetch and is caught at the outer boundary.
            let query = build_search_query(org, allowed_repos, target, state);
            let endpoint = issue_search_endpoint(&query, self.config.per_page);
            let results: SearchResults<RestItem> = self.client.rest_get(&endpoint).await?;
            return Ok(results
                .items
                .into_iter()
                .filter(|raw| target != SearchTarget::Issues || raw.pull_request.is_none())
                .map(|raw| raw.into_board_item(item_type))
                .collect());
        }

        let mut items = Vec::new();
        for repo in allowed_repos {
            let endpoint = repo_items_endpoint(org, repo, target, state);
            match self.client.rest_get::<Vec<RestItem>>(&endpoint).await {
                Ok(raw_items) => {
                    items.extend(
                        raw_items
                            .into_iter()
                            // The issues list endpoint returns PRs too.
                            .filter(|raw| {
                                target != SearchTarget::Issues || raw.pull_request.is_none()
                            })
                            .map(|raw| {
                                let mut item = raw.into_board_item(item_type);
                                item.repository = Some(repo.clone());
                                item
                            }),
                    );
                }
                Err(e) => {
                    warn!(repository = %repo, error = %e, "skipping repository after failed fetch");
                }
            }
        }
        Ok(items)
    }

    /// Fetches discussions, always per repository over GraphQL (no org-wide
    /// discussion search exists). Without an allow-list the candidates come
    /// from [`org_repositories`](Self::org_repositories).
    pub async fn fetch_discussions(&self, org: &str, allowed_repos: &[String]) -> Vec<BoardItem> {
        let repos = if allowed_repos.is_empty() {
            self.org_repositories(org).await
        } else {
            allowed_repos.to_vec()
        };

        let mut items = Vec::new();
        for repo in &repos {
            let variables = DiscussionsVariable {
                owner: org.to_string(),
                name: repo.clone(),
            };
            match self
                .client
                .graphql::<_, DiscussionsResponse>(DISCUSSIONS_QUERY, &variables)
                .await
            {
                Ok(response) => {
                    let nodes = response
                        .repository
                        .map(|repository| repository.discussions.nodes)
                        .unwrap_or_default();
                    items.extend(nodes.into_iter().map(|node| {
                        let mut item = BoardItem::from(node);
                        item.repository = Some(repo.clone());
                        item
                    }));
                }
                Err(e) => {
                    warn!(repository = %repo, error = %e, "skipping repository after failed discussion fetch");
                }
            }
        }

        filter_by_user(items, &self.config.excluded_users)
    }

    /// Lists the organization's repository short names, most recently
    /// updated first, intersected with the configured allow-list when one
    /// is present (preserving the search order, not the allow-list order)
    /// and then ordered per the configured sort.
    pub async fn org_repositories(&self, org: &str) -> Vec<String> {
        match self.org_repositories_inner(org).await {
            Ok(names) => names,
            Err(e) => {
                warn!(org, error = %e, "repository listing failed, returning no repositories");
                Vec::new()
            }
        }
    }

    async fn org_repositories_inner(&self, org: &str) -> Result<Vec<String>, ApiError> {
        let results: SearchResults<RestRepo> =
            self.client.rest_get(&repo_search_endpoint(org)).await?;
        let mut names: Vec<String> = results.items.into_iter().map(|repo| repo.name).collect();
        if !self.config.repositories.is_empty() {
            names.retain(|name| self.config.repositories.contains(name));
        }
        self.config.sort_repositories(&mut names);
        Ok(names)
    }

    /// Fetches the organization profile, or `None` on any failure.
    pub async fn fetch_organization(&self, org: &str) -> Option<OrgInfo> {
        match self.client.rest_get::<OrgInfo>(&format!("/orgs/{}", org)).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(org, error = %e, "organization fetch failed");
                None
            }
        }
    }

    /// Fetches a repository README as plain text, or `None` on any failure.
    ///
    /// GitHub returns the content base64-encoded with embedded newlines;
    /// the newlines are stripped before decoding.
    pub async fn fetch_readme(&self, org: &str, repo: &str) -> Option<String> {
        let endpoint = format!("/repos/{}/{}/readme", org, repo);
        let readme = match self.client.rest_get::<RestReadme>(&endpoint).await {
            Ok(readme) => readme,
            Err(e) => {
                warn!(org, repository = %repo, error = %e, "readme fetch failed");
                return None;
            }
        };

        if readme.encoding.as_deref() != Some("base64") {
            return Some(readme.content);
        }

        let packed = readme.content.replace('\n', "");
        match BASE64.decode(packed.as_bytes()) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(org, repository = %repo, error = %e, "readme is not valid UTF-8");
                    None
                }
            },
            Err(e) => {
                warn!(org, repository = %repo, error = %e, "readme base64 decode failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemAuthor, ItemState};
    use chrono::Utc;

    fn item_by(login: &str) -> BoardItem {
        BoardItem {
            id: 1,
            number: 1,
            title: "t".to_string(),
            state: ItemState::Open,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            html_url: String::new(),
            user: ItemAuthor {
                login: login.to_string(),
                avatar_url: String::new(),
            },
            labels: Vec::new(),
            repository: None,
            item_type: ItemType::Issue,
            node_id: None,
        }
    }

    #[test]
    fn test_filter_by_user_is_case_insensitive() {
        let items = vec![item_by("Bot"), item_by("alice")];
        let excluded = vec!["bot".to_string()];

        let kept = filter_by_user(items, &excluded);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].user.login, "alice");
    }

    #[test]
    fn test_filter_by_user_empty_list_keeps_everything() {
        let items = vec![item_by("bot"), item_by("alice")];
        let kept = filter_by_user(items, &[]);
        assert_eq!(kept.len(), 2);
    }
}
