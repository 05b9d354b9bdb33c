use crate::support::{detail_page, test_config, test_session, watchlist_page};
use csfd_export::crawler::{Exporter, FetchResult, PageFetcher, RequestKind, StopReason};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_success() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    Mock::given(method("GET"))
        .and(path("/film/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new(&test_session(&config), &config.fetch);
    let url = url::Url::parse(&format!("{}/film/1/", mock_server.uri())).unwrap();

    match fetcher.fetch(&url, RequestKind::Detail).await {
        FetchResult::Success { status_code, body } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "<html>ok</html>");
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_retry_gives_up_after_retry_count() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    Mock::given(method("GET"))
        .and(path("/film/1/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new(&test_session(&config), &config.fetch);
    let url = url::Url::parse(&format!("{}/film/1/", mock_server.uri())).unwrap();

    let result = fetcher.fetch_with_retry(&url, RequestKind::Detail).await;
    assert!(matches!(result, FetchResult::HttpError { status_code: 503 }));
}

#[tokio::test]
async fn test_retry_recovers_after_transient_error() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    Mock::given(method("GET"))
        .and(path("/film/1/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/film/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("later"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = PageFetcher::new(&test_session(&config), &config.fetch);
    let url = url::Url::parse(&format!("{}/film/1/", mock_server.uri())).unwrap();

    let result = fetcher.fetch_with_retry(&url, RequestKind::Detail).await;
    assert_eq!(result.into_body().as_deref(), Some("later"));
}

#[tokio::test]
async fn test_network_error_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    // Nothing listens on port 9 of localhost
    let config = test_config("http://127.0.0.1:9", dir.path());

    let fetcher = PageFetcher::new(&test_session(&config), &config.fetch);
    let url = url::Url::parse("http://127.0.0.1:9/film/1/").unwrap();

    let result = fetcher.fetch(&url, RequestKind::Detail).await;
    assert!(matches!(result, FetchResult::NetworkError { .. }));
}

#[tokio::test]
async fn test_failed_detail_page_degrades_record() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(watchlist_page(&[
            ("Dostupný", "/film/ok/", "(2001)"),
            ("Rozbitý", "/film/broken/", "(2002)"),
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(watchlist_page(&[])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/film/ok/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("42", "", &[], "")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/film/broken/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&mock_server)
        .await;

    let session = test_session(&config);
    let exporter = Exporter::new(config);
    let fetcher = PageFetcher::new(&session, &exporter.config().fetch);

    let outcome = exporter.scrape_watchlist(&session, &fetcher).await;
    let mut stubs = outcome.items;
    let degraded = exporter.enrich(&fetcher, &mut stubs).await;

    assert_eq!(degraded, 1);
    assert_eq!(stubs[0].rating_count, 42);
    assert_eq!(stubs[1].rating_count, 0);
    assert_eq!(stubs[1].english_title.as_deref(), Some(""));
    assert!(stubs[1].is_enriched());
}

#[tokio::test]
async fn test_listing_failure_keeps_earlier_pages() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&mock_server.uri(), dir.path());

    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(watchlist_page(&[("A", "/film/a/", "(2001)")])),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/soukrome/chci-videt/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&mock_server)
        .await;

    let session = test_session(&config);
    let exporter = Exporter::new(config);
    let fetcher = PageFetcher::new(&session, &exporter.config().fetch);

    let outcome = exporter.scrape_watchlist(&session, &fetcher).await;

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].title, "A");
    assert_eq!(outcome.stop, StopReason::FetchFailed { page: 2 });
}
