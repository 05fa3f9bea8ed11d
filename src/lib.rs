/// Static board configuration loaded once at process start
pub mod config;

/// GitHub API transport, response caching, and raw payload types
pub mod github;

/// Fetch orchestration and aggregation services backing the board views
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
