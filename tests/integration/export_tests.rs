use crate::support::{detail_page, ratings_page, test_config, test_session, watchlist_page};
use csfd_export::crawler::{ExportMode, Exporter, Progress, ProgressReporter};
use csfd_export::output::{read_records, EnrichedRow, RatingRow, WatchlistRow};
use csfd_export::session::CookieLogin;
use csfd_export::ExportError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_html(server: &MockServer, url_path: &str, page: Option<&str>, body: String) {
    let mut mock = Mock::given(method("GET")).and(path(url_path));
    if let Some(page) = page {
        mock = mock.and(query_param("page", page));
    }
    mock.respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_enriched_watchlist_end_to_end() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    let page_one = watchlist_page(&[
        ("Pelíšky", "/film/1-pelisky/", "(1999)"),
        ("Neznámý", "/film/2-neznamy/", "(2024)"),
        ("Kolja", "/film/3-kolja/", "(1996)"),
        ("Samotáři", "/film/4-samotari/", "Drama"),
    ]);

    // The site repeats its last page instead of serving an empty one
    mount_html(&mock_server, "/soukrome/chci-videt/", Some("1"), page_one.clone()).await;
    mount_html(&mock_server, "/soukrome/chci-videt/", Some("2"), page_one).await;
    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_html(
        &mock_server,
        "/film/1-pelisky/",
        None,
        detail_page("500 hodnocení", "Cosy Dens", &["Komedie", "Drama"], "Vánoce   1967."),
    )
    .await;
    mount_html(
        &mock_server,
        "/film/2-neznamy/",
        None,
        detail_page("0 hodnocení", "", &[], ""),
    )
    .await;
    mount_html(
        &mock_server,
        "/film/3-kolja/",
        None,
        detail_page("1 234 hodnocení", "Kolya", &["Drama"], "Violoncellista."),
    )
    .await;
    mount_html(
        &mock_server,
        "/film/4-samotari/",
        None,
        detail_page("500", "Loners", &["Komedie"], "Praha."),
    )
    .await;

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let session = test_session(&config);
    let exporter = Exporter::new(config).with_progress(ProgressReporter::new(tx));

    let summary = exporter
        .run_with_session(&session, ExportMode::Watchlist { enriched: true })
        .await
        .expect("Export failed");

    assert_eq!(summary.pages, 1);
    assert_eq!(summary.listed, 4);
    assert_eq!(summary.enriched, 4);
    assert_eq!(summary.degraded, 0);
    assert_eq!(summary.dropped_unrated, 1);
    assert_eq!(summary.written, 3);

    let rows: Vec<EnrichedRow> = read_records(&dir.path().join("watchlist.csv")).unwrap();
    let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
    // Descending by rating count; the two 500s keep discovery order
    assert_eq!(titles, vec!["Kolja", "Pelíšky", "Samotáři"]);

    assert_eq!(
        rows[1],
        EnrichedRow {
            title: "Pelíšky".to_string(),
            english_title: "Cosy Dens".to_string(),
            year: "1999".to_string(),
            total_ratings: 500,
            genres: "Komedie / Drama".to_string(),
            plot: "Vánoce 1967.".to_string(),
        }
    );
    assert_eq!(rows[2].year, "N/A");
    assert!(rows.iter().all(|r| r.total_ratings > 0));

    drop(exporter);
    let mut enriched_events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let Progress::Enriched { current, total, .. } = event {
            enriched_events.push((current, total));
        }
    }
    assert_eq!(enriched_events, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
}

#[tokio::test]
async fn test_basic_watchlist_stops_on_empty_page() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    mount_html(
        &mock_server,
        "/soukrome/chci-videt/",
        Some("1"),
        watchlist_page(&[("A", "/film/a/", "(2001)")]),
    )
    .await;
    mount_html(
        &mock_server,
        "/soukrome/chci-videt/",
        Some("2"),
        watchlist_page(&[("B", "/film/b/", "(2002)")]),
    )
    .await;
    mount_html(&mock_server, "/soukrome/chci-videt/", Some("3"), watchlist_page(&[])).await;

    mount_html(&mock_server, "/film/a/", None, detail_page("10", "", &[], "")).await;
    mount_html(&mock_server, "/film/b/", None, detail_page("20", "", &[], "")).await;

    let session = test_session(&config);
    let summary = Exporter::new(config)
        .run_with_session(&session, ExportMode::Watchlist { enriched: false })
        .await
        .expect("Export failed");

    assert_eq!(summary.pages, 2);

    let path = dir.path().join("watchlist.csv");
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "title,year,totalRatings\nB,2002,20\nA,2001,10\n");

    let rows: Vec<WatchlistRow> = read_records(&path).unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_ratings_export() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    Mock::given(method("GET"))
        .and(path("/uzivatel/123456-divak/hodnoceni/"))
        .and(query_param("type", "0"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ratings_page(&[
            ("Kolja", "(1996)", "stars stars-5"),
            ("Odpad", "(2010)", "stars trash"),
        ])))
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/uzivatel/123456-divak/hodnoceni/",
        Some("2"),
        ratings_page(&[]),
    )
    .await;

    let session = test_session(&config);
    let summary = Exporter::new(config)
        .run_with_session(&session, ExportMode::Ratings)
        .await
        .expect("Export failed");

    assert_eq!(summary.written, 2);

    let rows: Vec<RatingRow> = read_records(&dir.path().join("ratings.csv")).unwrap();
    assert_eq!(
        rows,
        vec![
            RatingRow {
                title: "Kolja".to_string(),
                year: "1996".to_string(),
                rating: "5/5".to_string(),
            },
            RatingRow {
                title: "Odpad".to_string(),
                year: "2010".to_string(),
                rating: "0/5".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_auth_failure_writes_nothing() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    mount_html(
        &mock_server,
        "/",
        None,
        r#"<html><body><a href="/prihlaseni/">Přihlásit</a></body></html>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = CookieLogin::new(
        "PHPSESSID=stale",
        config.site.clone(),
        config.fetch.clone(),
    );
    let result = Exporter::new(config)
        .run(&provider, ExportMode::Watchlist { enriched: true })
        .await;

    assert!(matches!(result, Err(ExportError::AuthFailure)));
    assert!(!dir.path().join("watchlist.csv").exists());
}

#[tokio::test]
async fn test_cookie_login_replays_cookie() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    mount_html(
        &mock_server,
        "/",
        None,
        r#"<html><body><a href="/odhlasit/">Odhlásit</a></body></html>"#.to_string(),
    )
    .await;

    // Only answers requests carrying the session cookie
    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .and(header("cookie", "PHPSESSID=live"))
        .respond_with(ResponseTemplate::new(200).set_body_string(watchlist_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = CookieLogin::new("PHPSESSID=live", config.site.clone(), config.fetch.clone());
    let summary = Exporter::new(config)
        .run(&provider, ExportMode::Watchlist { enriched: false })
        .await
        .expect("Export failed");

    assert_eq!(summary.listed, 0);
    assert_eq!(summary.written, 0);
    let content = std::fs::read_to_string(dir.path().join("watchlist.csv")).unwrap();
    assert_eq!(content, "title,year,totalRatings\n");
}
