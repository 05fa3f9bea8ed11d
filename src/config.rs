//! Board configuration
//!
//! Loaded once from a TOML file (or string) at process start and treated as
//! an immutable, injected dependency everywhere below. The token may come
//! from the file or fall back to the `GITHUB_TOKEN` environment variable.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_per_page() -> u32 {
    30
}

/// Ordering applied to the repository listing served to the board views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoSort {
    /// Most recently updated first (the search API's own order)
    #[default]
    Updated,
    /// Alphabetical by short name
    Name,
}

/// Static configuration for the board data layer.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// GitHub organization the board presents
    pub org: String,
    /// Pre-supplied API token; requests run unauthenticated without one
    #[serde(default)]
    pub token: Option<String>,
    /// Allow-list of short repository names. Empty means org-wide scope.
    #[serde(default)]
    pub repositories: Vec<String>,
    /// Page size for search requests (list endpoints are fixed at 100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Whether the aggregate fetch includes discussions
    #[serde(default)]
    pub enable_discussions: bool,
    /// Logins whose items are dropped from every fetch result
    #[serde(default)]
    pub excluded_users: Vec<String>,
    /// Repository the board view opens on
    #[serde(default)]
    pub default_repository: Option<String>,
    /// Repository backing the roadmap view
    #[serde(default)]
    pub roadmap_repository: Option<String>,
    #[serde(default)]
    pub repository_sort: RepoSort,
}

impl BoardConfig {
    /// Parses configuration from TOML text, filling the token from the
    /// environment when the file does not set one.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(content).context("Failed to parse board configuration")?;
        if config.token.is_none() {
            config.token = std::env::var("GITHUB_TOKEN").ok();
        }
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Applies the configured ordering to a repository listing.
    pub fn sort_repositories(&self, names: &mut [String]) {
        match self.repository_sort {
            // Search results already arrive most-recently-updated first.
            RepoSort::Updated => {}
            RepoSort::Name => names.sort(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let config = BoardConfig::from_toml_str(r#"org = "acme""#).unwrap();

        assert_eq!(config.org, "acme");
        assert!(config.repositories.is_empty());
        assert_eq!(config.per_page, 30);
        assert!(!config.enable_discussions);
        assert_eq!(config.repository_sort, RepoSort::Updated);
    }

    #[test]
    fn test_parse_full_config() {
        let config = BoardConfig::from_toml_str(
            r#"
            org = "acme"
            token = "ghp_test"
            repositories = ["site", "docs"]
            per_page = 50
            enable_discussions = true
            excluded_users = ["renovate-bot"]
            default_repository = "site"
            roadmap_repository = "roadmap"
            repository_sort = "name"
            "#,
        )
        .unwrap();

        assert_eq!(config.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.repositories, vec!["site", "docs"]);
        assert_eq!(config.per_page, 50);
        assert!(config.enable_discussions);
        assert_eq!(config.roadmap_repository.as_deref(), Some("roadmap"));
        assert_eq!(config.repository_sort, RepoSort::Name);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.toml");
        std::fs::write(&path, "org = \"acme\"\nrepositories = [\"site\"]\n").unwrap();

        let config = BoardConfig::load(&path).unwrap();
        assert_eq!(config.org, "acme");
        assert_eq!(config.repositories, vec!["site"]);
    }

    #[test]
    fn test_load_missing_file_names_the_path() {
        let err = BoardConfig::load("/nonexistent/board.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/board.toml"));
    }

    #[test]
    fn test_sort_repositories_by_name() {
        let config = BoardConfig::from_toml_str(
            r#"
            org = "acme"
            repository_sort = "name"
            "#,
        )
        .unwrap();

        let mut names = vec!["site".to_string(), "docs".to_string(), "api".to_string()];
        config.sort_repositories(&mut names);
        assert_eq!(names, vec!["api", "docs", "site"]);
    }

    #[test]
    fn test_sort_repositories_updated_keeps_input_order() {
        let config = BoardConfig::from_toml_str(r#"org = "acme""#).unwrap();

        let mut names = vec!["site".to_string(), "api".to_string()];
        config.sort_repositories(&mut names);
        assert_eq!(names, vec!["site", "api"]);
    }
}
