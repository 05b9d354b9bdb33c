//! csfd-export: scrape ČSFD ratings and watchlists into CSV
//!
//! This crate logs into ČSFD, walks a user's paginated rating history or
//! watchlist, enriches watchlist entries with per-title metadata and writes
//! the normalized result to CSV.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod session;
pub mod url;

use thiserror::Error;

/// Main error type for csfd-export operations
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Login failed: logged-in marker not found after submitting credentials")]
    AuthFailure,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing credential '{field}' (set it in [account] or via {env_var})")]
    MissingCredential {
        field: &'static str,
        env_var: &'static str,
    },
}

/// Result type alias for csfd-export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{DetailFields, ItemStub, RatedTitle};
