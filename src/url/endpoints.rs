use url::{ParseError, Url};

/// A paginated listing on the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// A user's rating history: `/uzivatel/{user_id}/hodnoceni/?type=0`
    Ratings { user_id: String },

    /// The logged-in user's want-to-see list: `/soukrome/chci-videt/?filmType={n}`
    Watchlist { film_type: u8 },
}

impl Listing {
    /// Builds the URL of one listing page
    ///
    /// Page numbers start at 1.
    ///
    /// # Example
    ///
    /// ```
    /// use csfd_export::url::Listing;
    /// use url::Url;
    ///
    /// let origin = Url::parse("https://www.csfd.cz").unwrap();
    /// let url = Listing::Watchlist { film_type: 0 }.page_url(&origin, 2).unwrap();
    /// assert_eq!(url.as_str(), "https://www.csfd.cz/soukrome/chci-videt/?filmType=0&page=2");
    /// ```
    pub fn page_url(&self, origin: &Url, page: u32) -> Result<Url, ParseError> {
        let mut url = match self {
            Self::Ratings { user_id } => {
                let mut url = origin.join(&format!("/uzivatel/{}/hodnoceni/", user_id))?;
                url.query_pairs_mut().append_pair("type", "0");
                url
            }
            Self::Watchlist { film_type } => {
                let mut url = origin.join("/soukrome/chci-videt/")?;
                url.query_pairs_mut()
                    .append_pair("filmType", &film_type.to_string());
                url
            }
        };

        url.query_pairs_mut()
            .append_pair("page", &page.to_string());

        Ok(url)
    }

    /// Short name used in log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ratings { .. } => "ratings",
            Self::Watchlist { .. } => "watchlist",
        }
    }
}

/// Builds the absolute URL of the login form
pub fn login_url(origin: &Url, login_path: &str) -> Result<Url, ParseError> {
    origin.join(login_path)
}

/// Resolves a link href against the origin
///
/// Returns None for empty, fragment-only or non-HTTP(S) links.
pub fn resolve_link(href: &str, origin: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match origin.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
