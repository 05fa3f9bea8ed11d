//! Error kinds surfaced by the GitHub transport layer

/// Failure raised by a REST or GraphQL request.
///
/// Fetchers catch these at their own boundary and degrade to an empty
/// result; nothing above the service layer sees an `ApiError`.
#[derive(Debug)]
pub enum ApiError {
    /// Non-2xx HTTP response. Carries the status code and canonical reason;
    /// the body is intentionally left unread on this path.
    Status { status: u16, status_text: String },
    /// 2xx GraphQL response whose body contains a top-level `errors` array.
    /// Carries the raw errors payload; partial `data` is discarded.
    GraphQL(serde_json::Value),
    /// Network failure or unreadable/malformed response body
    Transport(reqwest::Error),
    /// Response body did not match the expected shape
    Parse(serde_json::Error),
}

impl ApiError {
    pub(crate) fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status {
                status,
                status_text,
            } => write!(f, "GitHub API error: {} {}", status, status_text),
            Self::GraphQL(errors) => write!(f, "GitHub GraphQL error: {}", errors),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Parse(e) => write!(f, "Unexpected response shape: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}
