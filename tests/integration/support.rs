//! Fixtures shared by the integration tests

use csfd_export::config::Config;
use csfd_export::session::Session;
use std::path::Path;

/// Config pointing at the mock server with no delays
pub fn test_config(origin: &str, out_dir: &Path) -> Config {
    let mut config = Config::default();
    config.account.username = Some("divak".to_string());
    config.account.password = Some("tajne".to_string());
    config.account.user_id = Some("123456-divak".to_string());
    config.site.origin = origin.to_string();
    config.fetch.listing_delay_ms = 0;
    config.fetch.detail_delay_ms = 0;
    config.fetch.retry_delay_ms = 10;
    config.fetch.retry_count = 3;
    config.output.ratings_path = out_dir.join("ratings.csv").display().to_string();
    config.output.watchlist_path = out_dir.join("watchlist.csv").display().to_string();
    config
}

pub fn test_session(config: &Config) -> Session {
    Session::from_cookies([("PHPSESSID", "abc")], &config.site, &config.fetch)
        .expect("Failed to build session")
}

/// A watchlist page with `(title, href, info)` rows
pub fn watchlist_page(rows: &[(&str, &str, &str)]) -> String {
    let articles: String = rows
        .iter()
        .map(|(title, href, info)| {
            format!(
                r#"<article class="article">
                     <h3 class="film-title-nooverflow"><a href="{href}" class="film-title-name">{title}</a></h3>
                     <span class="film-title-info"><span class="info">{info}</span></span>
                   </article>"#
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Chci vidět</title></head><body>
             <a href="/odhlasit/">Odhlásit</a>
             <section class="box">{articles}</section>
           </body></html>"#
    )
}

/// A detail page with the given enrichment fields
pub fn detail_page(counter: &str, english_title: &str, genres: &[&str], plot: &str) -> String {
    let genres: Vec<String> = genres
        .iter()
        .map(|g| format!(r#"<a href="/zanry/">{g}</a>"#))
        .collect();

    format!(
        r#"<html><body>
             <ul class="names"><li title="anglický název">{english_title}</li></ul>
             <div class="genres">{}</div>
             <ul class="tab-nav-list">
               <li class="tab-nav-item ratings-btn active"><a>Hodnocení <span class="counter">{counter}</span></a></li>
             </ul>
             <div class="plot-full"><p>{plot}</p></div>
           </body></html>"#,
        genres.join(" / ")
    )
}

/// A rating-history page with `(title, info, stars class)` rows
pub fn ratings_page(rows: &[(&str, &str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(title, info, stars)| {
            format!(
                r#"<tr>
                     <td class="name"><a href="/film/x/" class="film-title-name">{title}</a>
                       <span class="film-title-info"><span class="info">{info}</span></span></td>
                     <td class="star-rating-only"><span class="star-rating"><span class="{stars}"></span></span></td>
                   </tr>"#
            )
        })
        .collect();

    format!("<html><body><table>{rows}</table></body></html>")
}
