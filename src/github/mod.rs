pub mod cache;
pub mod client;
pub mod error;
pub mod graphql_types;
pub mod rest_types;
pub mod search;

pub use client::GitHubClient;
pub use error::ApiError;
