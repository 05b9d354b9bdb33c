use crate::config::types::{AccountConfig, Config, FetchConfig, OutputConfig, SiteConfig};
use crate::config::{ENV_PASSWORD, ENV_USERNAME};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_account_config(&config.account)?;
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;

    if config.watchlist.film_type > 9 {
        return Err(ConfigError::Validation(format!(
            "film_type must be between 0 and 9, got {}",
            config.watchlist.film_type
        )));
    }

    Ok(())
}

/// Validates account configuration
///
/// Username and password are only needed when no session cookie is given.
/// The user id is checked where the ratings URL is built.
fn validate_account_config(config: &AccountConfig) -> Result<(), ConfigError> {
    if is_blank(&config.cookie) {
        if is_blank(&config.username) {
            return Err(ConfigError::MissingCredential {
                field: "username",
                env_var: ENV_USERNAME,
            });
        }
        if is_blank(&config.password) {
            return Err(ConfigError::MissingCredential {
                field: "password",
                env_var: ENV_PASSWORD,
            });
        }
    }

    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let origin = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", config.origin, e)))?;

    if origin.scheme() != "https" && origin.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "origin '{}' must use http or https",
            config.origin
        )));
    }

    if !config.login_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "login_path must start with '/', got '{}'",
            config.login_path
        )));
    }

    if config.logged_in_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "logged_in_marker cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.retry_count < 1 {
        return Err(ConfigError::Validation(format!(
            "retry_count must be >= 1, got {}",
            config.retry_count
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.ratings_path.is_empty() {
        return Err(ConfigError::Validation(
            "ratings_path cannot be empty".to_string(),
        ));
    }

    if config.watchlist_path.is_empty() {
        return Err(ConfigError::Validation(
            "watchlist_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
