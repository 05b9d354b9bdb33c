use crate::config::{FetchConfig, SiteConfig};
use crate::session::{is_logged_in, Credentials, Session, SessionProvider};
use crate::{ExportError, Result};
use async_trait::async_trait;

/// Reuses the cookies of a browser that is already logged in
///
/// The session is checked by loading the origin page and looking for the
/// logged-in marker, so a stale cookie fails the same way a bad password does.
pub struct CookieLogin {
    header: String,
    site: SiteConfig,
    fetch: FetchConfig,
}

impl CookieLogin {
    pub fn new(header: impl Into<String>, site: SiteConfig, fetch: FetchConfig) -> Self {
        Self {
            header: header.into(),
            site,
            fetch,
        }
    }
}

#[async_trait]
impl SessionProvider for CookieLogin {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<Session> {
        let session = Session::from_cookie_header(&self.header, &self.site, &self.fetch)?;
        let origin = session.origin().clone();

        tracing::info!("Verifying session cookie against {}", origin);

        let response = session
            .client()
            .get(origin.clone())
            .send()
            .await
            .map_err(|source| ExportError::Http {
                url: origin.to_string(),
                source,
            })?;

        let body = response.text().await.map_err(|source| ExportError::Http {
            url: origin.to_string(),
            source,
        })?;

        if is_logged_in(&body, &self.site.logged_in_marker) {
            tracing::info!("Login successful (cookie)");
            Ok(session)
        } else {
            tracing::error!("Session cookie is not logged in");
            Err(ExportError::AuthFailure)
        }
    }
}
