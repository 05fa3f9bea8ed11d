//! REST search query and endpoint construction
//!
//! Pure functions turning (org, repository list, target, state) into the
//! query strings and endpoint paths the fetch layer requests.

use crate::types::StateFilter;

/// Which resource kind a search or list targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Issues,
    PullRequests,
}

impl SearchTarget {
    /// Search qualifier for this target
    pub fn qualifier(self) -> &'static str {
        match self {
            SearchTarget::Issues => "is:issue",
            SearchTarget::PullRequests => "is:pr",
        }
    }

    /// REST list path segment for this target
    pub fn list_path(self) -> &'static str {
        match self {
            SearchTarget::Issues => "issues",
            SearchTarget::PullRequests => "pulls",
        }
    }
}

/// Builds the repository scope portion of a search query.
///
/// An empty repository list scopes the query to the whole organization.
/// Otherwise each repository becomes a `repo:` token in input order, with no
/// deduplication; GitHub's search grammar requires quoting the `org/name`
/// pair when the name contains a dot or hyphen.
pub fn build_repo_filter(org: &str, repos: &[String]) -> String {
    if repos.is_empty() {
        return format!("org:{}", org);
    }

    repos
        .iter()
        .map(|name| {
            if name.contains('.') || name.contains('-') {
                format!("repo:\"{}/{}\"", org, name)
            } else {
                format!("repo:{}/{}", org, name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds a full issue/PR search query.
///
/// `StateFilter::All` omits the `is:<state>` qualifier entirely; the search
/// API has no literal `all` state.
pub fn build_search_query(
    org: &str,
    repos: &[String],
    target: SearchTarget,
    state: StateFilter,
) -> String {
    let mut parts = vec![build_repo_filter(org, repos), target.qualifier().to_string()];
    if state != StateFilter::All {
        parts.push(format!("is:{}", state));
    }
    parts.join(" ")
}

/// Endpoint for the issue/PR search API.
pub fn issue_search_endpoint(query: &str, per_page: u32) -> String {
    format!(
        "/search/issues?q={}&per_page={}&sort=updated&order=desc",
        urlencoding::encode(query),
        per_page
    )
}

/// Endpoint for the repository search API, scoped to an organization.
pub fn repo_search_endpoint(org: &str) -> String {
    format!(
        "/search/repositories?q={}&per_page=100&sort=updated&order=desc",
        urlencoding::encode(&format!("org:{}", org))
    )
}

/// Endpoint for the per-repository issue or pull request list.
///
/// The list endpoints accept `state=all` natively, unlike search.
pub fn repo_items_endpoint(
    org: &str,
    repo: &str,
    target: SearchTarget,
    state: StateFilter,
) -> String {
    format!(
        "/repos/{}/{}/{}?state={}&per_page=100&sort=updated&direction=desc",
        org,
        repo,
        target.list_path(),
        state
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_filter_empty_list_is_org_scope() {
        assert_eq!(build_repo_filter("acme", &[]), "org:acme");
    }

    #[test]
    fn test_repo_filter_quotes_dotted_and_hyphenated_names() {
        let repos = vec!["a.b".to_string()];
        assert_eq!(build_repo_filter("acme", &repos), "repo:\"acme/a.b\"");

        let repos = vec!["my-site".to_string()];
        assert_eq!(build_repo_filter("acme", &repos), "repo:\"acme/my-site\"");
    }

    #[test]
    fn test_repo_filter_plain_names_unquoted() {
        let repos = vec!["ab".to_string()];
        assert_eq!(build_repo_filter("acme", &repos), "repo:acme/ab");
    }

    #[test]
    fn test_repo_filter_preserves_order_and_duplicates() {
        let repos = vec!["beta".to_string(), "alpha".to_string(), "beta".to_string()];
        assert_eq!(
            build_repo_filter("acme", &repos),
            "repo:acme/beta repo:acme/alpha repo:acme/beta"
        );
    }

    #[test]
    fn test_search_query_includes_state() {
        let query = build_search_query("acme", &[], SearchTarget::Issues, StateFilter::Open);
        assert_eq!(query, "org:acme is:issue is:open");

        let query = build_search_query("acme", &[], SearchTarget::PullRequests, StateFilter::Closed);
        assert_eq!(query, "org:acme is:pr is:closed");
    }

    #[test]
    fn test_search_query_omits_state_for_all() {
        let query = build_search_query("acme", &[], SearchTarget::Issues, StateFilter::All);
        assert_eq!(query, "org:acme is:issue");
    }

    #[test]
    fn test_issue_search_endpoint_encodes_query() {
        let endpoint = issue_search_endpoint("org:acme is:issue is:open", 30);
        assert_eq!(
            endpoint,
            "/search/issues?q=org%3Aacme%20is%3Aissue%20is%3Aopen&per_page=30&sort=updated&order=desc"
        );
    }

    #[test]
    fn test_repo_items_endpoint() {
        assert_eq!(
            repo_items_endpoint("acme", "site", SearchTarget::PullRequests, StateFilter::All),
            "/repos/acme/site/pulls?state=all&per_page=100&sort=updated&direction=desc"
        );
    }
}
