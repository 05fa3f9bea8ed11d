//! Aggregate fetch across item types
//!
//! Composes the per-type fetchers into the single call the board and
//! roadmap views consume. The three type-level fetches run in sequence;
//! each already degrades to empty on failure, so the aggregate inherits the
//! partial-data behavior without any error handling of its own.

use crate::services::fetch::BoardFetcher;
use crate::types::{BoardItem, ItemType, StateFilter, TypeFilter};

/// Filter options for [`BoardFetcher::fetch_all_items`].
///
/// Unset fields take the defaults the board view uses: open items of every
/// type, all repositories.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub state: Option<StateFilter>,
    pub item_type: Option<TypeFilter>,
    /// Short repository name to keep; `None` or the literal `"all"` keeps
    /// every repository.
    pub repository: Option<String>,
}

impl BoardFetcher {
    /// Fetches every item matching the query, newest update first.
    ///
    /// Issues, pull requests, and discussions are fetched conditionally on
    /// the type filter (discussions additionally require
    /// `enable_discussions`), concatenated without cross-type
    /// deduplication (an item cannot appear as both issue and PR), filtered
    /// by repository after the fact, and stably sorted descending by
    /// `updated_at` so ties keep their fetch order.
    pub async fn fetch_all_items(&self, org: &str, query: ItemQuery) -> Vec<BoardItem> {
        let state = query.state.unwrap_or(StateFilter::Open);
        let type_filter = query.item_type.unwrap_or(TypeFilter::All);
        let allowed_repos = self.config().repositories.clone();

        let mut items = Vec::new();
        if type_filter.includes(ItemType::Issue) {
            items.extend(self.fetch_issues(org, state, &allowed_repos).await);
        }
        if type_filter.includes(ItemType::Pr) {
            items.extend(self.fetch_pull_requests(org, state, &allowed_repos).await);
        }
        if type_filter.includes(ItemType::Discussion) && self.config().enable_discussions {
            items.extend(self.fetch_discussions(org, &allowed_repos).await);
        }

        if let Some(repository) = query.repository.as_deref().filter(|r| *r != "all") {
            items.retain(|item| item.repository.as_deref() == Some(repository));
        }

        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        items
    }
}
