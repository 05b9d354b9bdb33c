//! Session module for authenticated requests
//!
//! Login happens once per run. The provider hands back a [`Session`]: an HTTP
//! client whose cookie jar carries the logged-in state, replayed by every
//! subsequent request.
//!
//! # Providers
//!
//! - `BrowserLogin`: drives headless Chromium through the login form
//! - `CookieLogin`: replays a `Cookie` header copied from a browser

mod browser;
mod cookie;

pub use browser::BrowserLogin;
pub use cookie::CookieLogin;

use crate::config::{AccountConfig, Config, FetchConfig, SiteConfig};
use crate::{ExportError, Result};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Login name and password
#[derive(Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Takes credentials from the account section; missing values become empty
    pub fn from_account(account: &AccountConfig) -> Self {
        Self {
            username: account.username.clone().unwrap_or_default(),
            password: account.password.clone().unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticated HTTP context shared by every request of a run
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
    origin: Url,
}

impl Session {
    /// Builds a session whose jar holds the given `(name, value)` cookies
    ///
    /// Cookies are scoped to the origin host with path `/`.
    pub fn from_cookies<I, N, V>(cookies: I, site: &SiteConfig, fetch: &FetchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let origin = Url::parse(&site.origin)?;
        let jar = Arc::new(Jar::default());

        let mut count = 0usize;
        for (name, value) in cookies {
            jar.add_cookie_str(
                &format!("{}={}; Path=/", name.as_ref(), value.as_ref()),
                &origin,
            );
            count += 1;
        }
        tracing::debug!("Session created with {} cookies for {}", count, origin);

        let client = build_http_client(site, fetch, jar).map_err(|source| ExportError::Http {
            url: origin.to_string(),
            source,
        })?;

        Ok(Self { client, origin })
    }

    /// Builds a session from a raw `Cookie` header (`a=1; b=2`)
    pub fn from_cookie_header(header: &str, site: &SiteConfig, fetch: &FetchConfig) -> Result<Self> {
        Self::from_cookies(parse_cookie_header(header), site, fetch)
    }

    /// The HTTP client carrying the session cookies
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Origin all listing and detail URLs are resolved against
    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

/// Obtains an authenticated session
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Logs in and returns the session
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Logged-in marker was found
    /// * `Err(ExportError::AuthFailure)` - Marker absent after login
    /// * `Err(_)` - Login could not be attempted
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session>;
}

/// Picks the provider the configuration asks for
///
/// A configured cookie wins over browser login.
pub fn provider_for(config: &Config) -> Box<dyn SessionProvider> {
    match config.account.cookie.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(cookie) => Box::new(CookieLogin::new(
            cookie,
            config.site.clone(),
            config.fetch.clone(),
        )),
        None => Box::new(BrowserLogin::new(
            config.site.clone(),
            config.fetch.clone(),
            config.browser.clone(),
        )),
    }
}

/// Returns true when the page source shows the logged-in marker
pub fn is_logged_in(page_source: &str, marker: &str) -> bool {
    page_source.contains(marker)
}

/// Builds the HTTP client used for every request of the run
///
/// Fixed User-Agent and timeout; cookies come from the session jar.
fn build_http_client(
    site: &SiteConfig,
    fetch: &FetchConfig,
    jar: Arc<Jar>,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(site.user_agent.clone())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .cookie_provider(jar)
        .gzip(true)
        .brotli(true)
        .build()
}

fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}
