use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable overriding `[account] username`
pub const ENV_USERNAME: &str = "CSFD_USERNAME";

/// Environment variable overriding `[account] password`
pub const ENV_PASSWORD: &str = "CSFD_PASSWORD";

/// Environment variable overriding `[account] user-id`
pub const ENV_USER_ID: &str = "CSFD_USER_ID";

/// Loads and parses a configuration file from the given path
///
/// Account values from the environment take precedence over the file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use csfd_export::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Retries: {}", config.fetch.retry_count);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    apply_env_overrides(&mut config);

    validate(&config)?;

    Ok(config)
}

/// Overrides account values with `CSFD_USERNAME`, `CSFD_PASSWORD` and `CSFD_USER_ID`
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

/// Overrides account values using an arbitrary lookup
///
/// Empty values are ignored so an exported-but-blank variable does not
/// clobber the file.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(username) = get(ENV_USERNAME) {
        config.account.username = Some(username);
    }
    if let Some(password) = get(ENV_PASSWORD) {
        config.account.password = Some(password);
    }
    if let Some(user_id) = get(ENV_USER_ID) {
        config.account.user_id = Some(user_id);
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so two runs can be matched to the same settings.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
