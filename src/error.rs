//! Error types for dictumdl
//!
//! Uses thiserror for ergonomic error definitions with clear messages
//! that guide users toward fixing common issues. The catalog and detection
//! code is infallible by design; errors only arise at the edges (feed
//! fetching, config loading, route checking).

use thiserror::Error;

/// Top-level error type for the dictumdl application
#[derive(Error, Debug)]
pub enum DictumdlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Release feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Route check error: {0}")]
    Routes(#[from] RouteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors fetching or parsing the release feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid feed endpoint '{0}': must start with http:// or https://")]
    Endpoint(String),

    #[error("Could not reach the release feed: {0}\n  Check your network, or point --feed-file at a local JSON feed.")]
    Network(String),

    #[error("Release feed returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Release feed is not a JSON array of releases: {0}")]
    Malformed(String),

    #[error("Could not read feed file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors running the use-case route check
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Could not read use-case config {path}: {reason}")]
    ConfigRead { path: String, reason: String },

    #[error("Use-case config {path} has no [use_cases] table")]
    MissingTable { path: String },

    #[error("Could not list pages directory {path}: {source}")]
    PagesDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using DictumdlError
pub type Result<T> = std::result::Result<T, DictumdlError>;
