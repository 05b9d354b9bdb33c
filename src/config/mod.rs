//! Configuration module for csfd-export
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Account values can also come from the environment.
//!
//! # Example
//!
//! ```no_run
//! use csfd_export::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scraping {}", config.site.origin);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AccountConfig, BrowserConfig, Config, FetchConfig, OutputConfig, SiteConfig, WatchlistConfig,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, apply_overrides, compute_config_hash, load_config, load_config_with_hash,
    ENV_PASSWORD, ENV_USERNAME, ENV_USER_ID,
};
pub use validation::validate;
