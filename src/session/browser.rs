use crate::config::{BrowserConfig, FetchConfig, SiteConfig};
use crate::session::{is_logged_in, Credentials, Session, SessionProvider};
use crate::url::login_url;
use crate::{ExportError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use url::Url;

/// Logs in through the site's login form in headless Chromium
///
/// After submitting the form the page source is checked for the logged-in
/// marker. On success every browser cookie is copied into a [`Session`].
pub struct BrowserLogin {
    site: SiteConfig,
    fetch: FetchConfig,
    browser: BrowserConfig,
}

impl BrowserLogin {
    pub fn new(site: SiteConfig, fetch: FetchConfig, browser: BrowserConfig) -> Self {
        Self {
            site,
            fetch,
            browser,
        }
    }

    fn settle_time(&self) -> Duration {
        Duration::from_millis(self.browser.settle_ms)
    }

    async fn launch(&self) -> Result<(Browser, tokio::task::JoinHandle<()>)> {
        let mut builder = ChromeConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !self.browser.headless {
            builder = builder.with_head();
        }

        if let Some(ref executable) = self.browser.executable {
            builder = builder.chrome_executable(executable);
        }

        let config = builder
            .build()
            .map_err(|e| ExportError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ExportError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handle))
    }

    /// Fills in and submits the login form, then returns the cookies
    ///
    /// Returns `Ok(None)` when the logged-in marker is missing.
    async fn submit_login(
        &self,
        page: &Page,
        credentials: &Credentials,
    ) -> Result<Option<Vec<(String, String)>>> {
        tokio::time::sleep(self.settle_time()).await;

        page.find_element("input[name=username]")
            .await
            .map_err(|e| ExportError::Browser(format!("Username field not found: {}", e)))?
            .click()
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to focus username: {}", e)))?
            .type_str(&credentials.username)
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to type username: {}", e)))?;

        page.find_element("input[name=password]")
            .await
            .map_err(|e| ExportError::Browser(format!("Password field not found: {}", e)))?
            .click()
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to focus password: {}", e)))?
            .type_str(&credentials.password)
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to type password: {}", e)))?
            .press_key("Enter")
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to submit login form: {}", e)))?;

        tokio::time::sleep(self.settle_time()).await;

        let source = page
            .content()
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to read page source: {}", e)))?;

        if !is_logged_in(&source, &self.site.logged_in_marker) {
            return Ok(None);
        }

        let cookies = page
            .get_cookies()
            .await
            .map_err(|e| ExportError::Browser(format!("Failed to read cookies: {}", e)))?
            .into_iter()
            .map(|cookie| (cookie.name, cookie.value))
            .collect();

        Ok(Some(cookies))
    }
}

#[async_trait]
impl SessionProvider for BrowserLogin {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session> {
        let origin = Url::parse(&self.site.origin)?;
        let url = login_url(&origin, &self.site.login_path)?;

        tracing::info!("Logging in as {} at {}", credentials.username, url);

        let (mut browser, handle) = self.launch().await?;

        let outcome = match browser.new_page(url.as_str()).await {
            Ok(page) => {
                if let Err(e) = page.set_user_agent(&self.site.user_agent).await {
                    tracing::debug!("Could not set browser user agent: {}", e);
                }
                self.submit_login(&page, credentials).await
            }
            Err(e) => Err(ExportError::Browser(format!("Failed to open login page: {}", e))),
        };

        // The browser is closed whatever the outcome
        if let Err(e) = browser.close().await {
            tracing::debug!("Failed to close browser: {}", e);
        }
        let _ = browser.wait().await;
        handle.abort();

        match outcome? {
            Some(cookies) => {
                tracing::info!("Login successful ({} cookies)", cookies.len());
                Session::from_cookies(cookies, &self.site, &self.fetch)
            }
            None => {
                tracing::error!("Login failed: marker '{}' not found", self.site.logged_in_marker);
                Err(ExportError::AuthFailure)
            }
        }
    }
}
