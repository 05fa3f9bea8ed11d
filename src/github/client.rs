//! GitHub transport: one entry point per upstream protocol
//!
//! Both request paths consult and populate the shared [`ResponseCache`]
//! before touching the network. There is deliberately no retry loop here;
//! a failed request is retried, at the earliest, by the next user-facing
//! request once the cache entry has expired.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::github::cache::ResponseCache;
use crate::github::error::ApiError;

const REST_BASE_URL: &str = "https://api.github.com";
const GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// REST API version pinned via the `X-GitHub-Api-Version` header
const API_VERSION: &str = "2022-11-28";

// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("orgboard/", env!("CARGO_PKG_VERSION"));

/// Thin client over the GitHub REST and GraphQL APIs.
///
/// Owns the response cache, so dropping the client drops every cached
/// response with it. Authentication is a pre-supplied token forwarded as a
/// bearer header; without one, requests proceed unauthenticated and are
/// subject to the lower anonymous rate limits.
pub struct GitHubClient {
    http: reqwest::Client,
    token: Option<String>,
    rest_base: String,
    graphql_endpoint: String,
    cache: ResponseCache,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_urls(token, REST_BASE_URL, GRAPHQL_URL)
    }

    /// Builds a client against non-default endpoints (tests, GitHub
    /// Enterprise installations).
    pub fn with_base_urls(
        token: Option<String>,
        rest_base: impl Into<String>,
        graphql_endpoint: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            token,
            rest_base: rest_base.into(),
            graphql_endpoint: graphql_endpoint.into(),
            cache: ResponseCache::default(),
        })
    }

    /// Issues a GET against the REST API, returning the decoded response.
    ///
    /// `endpoint` is the path plus query string, e.g.
    /// `/repos/acme/site/issues?state=open`. Responses are cached under
    /// `rest:<endpoint>` for the cache TTL.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for a non-2xx response (the body is not read on
    /// that path), [`ApiError::Transport`] for network or body failures,
    /// [`ApiError::Parse`] when the payload does not match `T`.
    pub async fn rest_get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let cache_key = format!("rest:{}", endpoint);
        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(endpoint, "REST cache hit");
            return serde_json::from_value(hit).map_err(ApiError::Parse);
        }

        let url = format!("{}{}", self.rest_base, endpoint);
        debug!(%url, "REST request");

        let mut request = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        let body: Value = response.json().await.map_err(ApiError::Transport)?;
        self.cache.put(&cache_key, body.clone());

        serde_json::from_value(body).map_err(ApiError::Parse)
    }

    /// Executes a GraphQL query, returning the decoded `data` payload.
    ///
    /// The cache key concatenates the raw query text and the serialized
    /// variables, so two syntactically different queries are distinct
    /// entries even when semantically identical. That keeps the key scheme
    /// trivial at the cost of the occasional duplicate fetch.
    ///
    /// # Errors
    ///
    /// [`ApiError::Status`] for a non-2xx response, [`ApiError::GraphQL`]
    /// when a 2xx body carries a top-level `errors` array (any partial
    /// `data` alongside it is discarded), [`ApiError::Transport`] /
    /// [`ApiError::Parse`] as for REST.
    pub async fn graphql<V: Serialize, T: DeserializeOwned>(
        &self,
        query: &str,
        variables: &V,
    ) -> Result<T, ApiError> {
        let variables = serde_json::to_value(variables).map_err(ApiError::Parse)?;
        let cache_key = format!("graphql:{}:{}", query, variables);
        if let Some(hit) = self.cache.get(&cache_key) {
            debug!("GraphQL cache hit");
            return serde_json::from_value(hit).map_err(ApiError::Parse);
        }

        debug!(endpoint = %self.graphql_endpoint, "GraphQL request");

        let mut request = self
            .http
            .post(&self.graphql_endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        let body: Value = response.json().await.map_err(ApiError::Transport)?;
        if let Some(errors) = body.get("errors") {
            return Err(ApiError::GraphQL(errors.clone()));
        }

        let data = body.get("data").cloned().unwrap_or(Value::Null);
        self.cache.put(&cache_key, data.clone());

        serde_json::from_value(data).map_err(ApiError::Parse)
    }
}
