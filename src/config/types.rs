use serde::Deserialize;

/// Main configuration structure for csfd-export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Account credentials and the user whose ratings are exported
///
/// Every field may also be supplied through the environment, see
/// [`crate::config::apply_env_overrides`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Login name
    pub username: Option<String>,

    /// Login password
    pub password: Option<String>,

    /// Numeric profile id with slug, e.g. "123456-jmeno"
    #[serde(rename = "user-id")]
    pub user_id: Option<String>,

    /// Raw `Cookie` header of an already logged-in browser session.
    /// When set, the browser login is skipped.
    pub cookie: Option<String>,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host all paths are resolved against
    pub origin: String,

    /// Path of the login form
    #[serde(rename = "login-path")]
    pub login_path: String,

    /// Text present in the page source only when logged in
    #[serde(rename = "logged-in-marker")]
    pub logged_in_marker: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://www.csfd.cz".to_string(),
            login_path: "/prihlaseni/".to_string(),
            logged_in_marker: "Odhlásit".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Request timing and retry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Pause after every listing page request (milliseconds)
    #[serde(rename = "listing-delay-ms")]
    pub listing_delay_ms: u64,

    /// Pause after every detail page request (milliseconds)
    #[serde(rename = "detail-delay-ms")]
    pub detail_delay_ms: u64,

    /// Attempts per URL before giving up
    #[serde(rename = "retry-count")]
    pub retry_count: u32,

    /// Pause between failed attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Optional upper bound on listing pages
    #[serde(rename = "max-pages")]
    pub max_pages: Option<u32>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            listing_delay_ms: 500,
            detail_delay_ms: 100,
            retry_count: 3,
            retry_delay_ms: 2000,
            max_pages: None,
        }
    }
}

/// Headless browser used for login
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,

    /// Time to let the page settle after navigation and after submit (milliseconds)
    #[serde(rename = "settle-ms")]
    pub settle_ms: u64,

    /// Chrome/Chromium binary; detected from PATH when unset
    pub executable: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            settle_ms: 2000,
            executable: None,
        }
    }
}

/// Watchlist listing options
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WatchlistConfig {
    /// Value of the `filmType` query parameter (0 = films, 1 = series, ...)
    #[serde(rename = "film-type")]
    pub film_type: u8,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV written in ratings mode
    #[serde(rename = "ratings-path")]
    pub ratings_path: String,

    /// CSV written in watchlist mode
    #[serde(rename = "watchlist-path")]
    pub watchlist_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ratings_path: "movies_ratings.csv".to_string(),
            watchlist_path: "watchlist_sorted.csv".to_string(),
        }
    }
}
