//! Mock-based search tests using wiremock.
//!
//! These tests drive the real client against mocked CrossRef and arXiv APIs.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use paper_finder::client::PaperClient;
use paper_finder::config::Config;
use paper_finder::error::{ClientError, GENERIC_FETCH_ERROR, SearchError};
use paper_finder::models::{NewEntry, SortOrder, Source};
use paper_finder::search::Searcher;
use paper_finder::store::EntryStore;

/// Config pointed at the mock server, with a private store directory.
fn test_config(mock_server: &MockServer, dir: &tempfile::TempDir) -> Config {
    Config::for_testing(&mock_server.uri()).with_store_path(dir.path().join("papers.json"))
}

/// Sample CrossRef work JSON.
fn crossref_work(doi: &str, title: &str, year: i32) -> serde_json::Value {
    json!({
        "DOI": doi,
        "URL": format!("https://doi.org/{doi}"),
        "title": [title],
        "author": [{"given": "Test", "family": "Author"}],
        "issued": {"date-parts": [[year, 1, 1]]},
        "subject": ["Computer Science"]
    })
}

fn crossref_body(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "status": "ok",
        "message-type": "work-list",
        "message": {"total-results": items.len(), "items": items}
    })
}

/// Sample arXiv feed with one entry per (id, title, year).
fn arxiv_feed(entries: &[(&str, &str, i32)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query</title>
"#,
    );
    for (id, title, year) in entries {
        xml.push_str(&format!(
            r#"  <entry>
    <id>http://arxiv.org/abs/{id}</id>
    <published>{year}-05-01T00:00:00Z</published>
    <title>{title}</title>
    <author><name>Arxiv Author</name></author>
    <link href="http://arxiv.org/abs/{id}" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/{id}" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.LG"/>
  </entry>
"#
        ));
    }
    xml.push_str("</feed>");
    xml
}

async fn mount_crossref(mock_server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

async fn mount_arxiv(mock_server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/arxiv/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/atom+xml")
                .set_body_string(body),
        )
        .mount(mock_server)
        .await;
}

// =============================================================================
// Client Tests
// =============================================================================

#[tokio::test]
async fn test_crossref_request_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .and(query_param("query", "protein folding"))
        .and(query_param("rows", "5"))
        .and(query_param("mailto", "me@example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(crossref_body(vec![
            crossref_work("10.1/a", "Folding", 2019),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.crossref_mailto = Some("me@example.org".to_string());
    let client = PaperClient::new(&config).unwrap();

    let papers = client.search_crossref("protein folding", 5).await.unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].title, "Folding");
    assert_eq!(papers[0].source, Source::CrossRef);
}

#[tokio::test]
async fn test_arxiv_request_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/arxiv/query"))
        .and(query_param("search_query", "all:quantum"))
        .and(query_param("start", "0"))
        .and(query_param("max_results", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(arxiv_feed(&[("2301.00001v1", "Quantum Stuff", 2023)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PaperClient::new(&Config::for_testing(&mock_server.uri())).unwrap();

    let papers = client.search_arxiv("quantum", 10).await.unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].year, Some(2023));
    assert_eq!(papers[0].pdf.as_deref(), Some("http://arxiv.org/pdf/2301.00001v1"));
    assert_eq!(papers[0].topic.as_deref(), Some("cs.LG"));
}

#[tokio::test]
async fn test_arxiv_error_feed_is_bad_request() {
    let mock_server = MockServer::start().await;

    let error_feed = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#max_results_must_be_non_negative</id>
    <title>Error</title>
    <summary>max_results must be non-negative</summary>
  </entry>
</feed>"#;
    mount_arxiv(&mock_server, error_feed.to_string()).await;

    let client = PaperClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let err = client.search_arxiv("x", 10).await.unwrap_err();

    assert!(matches!(err, ClientError::BadRequest { ref message } if message.contains("non-negative")));
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&mock_server)
        .await;

    let client = PaperClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let err = client.search_crossref("x", 10).await.unwrap_err();

    assert!(matches!(err, ClientError::RateLimited { retry_after } if retry_after.as_secs() == 7));
}

#[tokio::test]
async fn test_malformed_crossref_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = PaperClient::new(&Config::for_testing(&mock_server.uri())).unwrap();
    let err = client.search_crossref("x", 10).await.unwrap_err();

    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_status_codes_map_to_client_errors() {
    let mock_server = MockServer::start().await;

    for (status, query) in [(404, "missing"), (400, "malformed"), (418, "teapot")] {
        Mock::given(method("GET"))
            .and(path("/crossref/works"))
            .and(query_param("query", query))
            .respond_with(ResponseTemplate::new(status).set_body_string(format!("status {status}")))
            .mount(&mock_server)
            .await;
    }

    let client = PaperClient::new(&Config::for_testing(&mock_server.uri())).unwrap();

    let err = client.search_crossref("missing", 10).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { ref resource } if resource == "status 404"));

    let err = client.search_crossref("malformed", 10).await.unwrap_err();
    assert!(matches!(err, ClientError::BadRequest { ref message } if message == "status 400"));

    let err = client.search_crossref("teapot", 10).await.unwrap_err();
    assert!(matches!(err, ClientError::UnexpectedStatus { status: 418, ref message } if message == "status 418"));
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/arxiv/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(arxiv_feed(&[]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.request_timeout = Duration::from_millis(200);
    let client = PaperClient::new(&config).unwrap();

    let err = client.search_arxiv("slow", 10).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(d) if d == Duration::from_millis(200)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_source_fails_search_with_generic_message() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/crossref/works"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(crossref_body(vec![]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;
    mount_arxiv(&mock_server, arxiv_feed(&[])).await;

    let mut config = test_config(&mock_server, &dir);
    config.request_timeout = Duration::from_millis(200);

    let searcher = Searcher::from_config(&config).unwrap();
    let err = searcher.search("anything").await.unwrap_err();

    assert!(matches!(err, SearchError::Client(ClientError::Timeout(_))));
    assert_eq!(err.to_user_message(), GENERIC_FETCH_ERROR);
}

// =============================================================================
// Searcher Tests
// =============================================================================

#[tokio::test]
async fn test_search_merges_both_sources_newest_first() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_crossref(
        &mock_server,
        crossref_body(vec![
            crossref_work("10.1/old", "Old Graph Paper", 2001),
            crossref_work("10.1/mid", "Mid Graph Paper", 2015),
        ]),
    )
    .await;
    mount_arxiv(&mock_server, arxiv_feed(&[("2401.1v1", "New Graph Preprint", 2024)])).await;

    let searcher = Searcher::from_config(&test_config(&mock_server, &dir)).unwrap();
    let papers = searcher.search("graph").await.unwrap();

    let titles: Vec<_> = papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New Graph Preprint", "Mid Graph Paper", "Old Graph Paper"]);
}

#[tokio::test]
async fn test_search_includes_matching_user_entries_first_on_ties() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_crossref(&mock_server, crossref_body(vec![crossref_work("10.1/x", "Graph X", 2020)]))
        .await;
    mount_arxiv(&mock_server, arxiv_feed(&[])).await;

    let config = test_config(&mock_server, &dir);
    let store = EntryStore::new(&config.store_path);
    store
        .add(NewEntry {
            title: "My graph notes".into(),
            year: Some(2020),
            link: "https://example.org/notes".into(),
            ..NewEntry::default()
        })
        .await
        .unwrap();
    store
        .add(NewEntry {
            title: "Unrelated".into(),
            link: "https://example.org/other".into(),
            ..NewEntry::default()
        })
        .await
        .unwrap();

    let searcher = Searcher::from_config(&config).unwrap();
    let papers = searcher.search("Graph").await.unwrap();

    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].source, Source::User);
    assert_eq!(papers[1].title, "Graph X");
}

#[tokio::test]
async fn test_search_relevance_keeps_source_order() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_crossref(
        &mock_server,
        crossref_body(vec![
            crossref_work("10.1/a", "First", 1990),
            crossref_work("10.1/b", "Second", 2020),
        ]),
    )
    .await;
    mount_arxiv(&mock_server, arxiv_feed(&[("1.1v1", "Third", 2005)])).await;

    let searcher = Searcher::from_config(&test_config(&mock_server, &dir))
        .unwrap()
        .with_sort_order(SortOrder::Relevance);
    let papers = searcher.search("anything").await.unwrap();

    let titles: Vec<_> = papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[tokio::test]
async fn test_blank_query_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let searcher = Searcher::from_config(&test_config(&mock_server, &dir)).unwrap();
    assert!(searcher.search("   ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_one_failing_source_fails_whole_search() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_crossref(&mock_server, crossref_body(vec![crossref_work("10.1/a", "Fine", 2020)]))
        .await;
    Mock::given(method("GET"))
        .and(path("/arxiv/query"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let searcher = Searcher::from_config(&test_config(&mock_server, &dir)).unwrap();
    let err = searcher.search("anything").await.unwrap_err();

    assert!(matches!(err, SearchError::Client(ClientError::Server { status: 503, .. })));
    assert_eq!(err.to_user_message(), GENERIC_FETCH_ERROR);
}

#[tokio::test]
async fn test_corrupt_store_fails_search() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_crossref(&mock_server, crossref_body(vec![])).await;
    mount_arxiv(&mock_server, arxiv_feed(&[])).await;

    let config = test_config(&mock_server, &dir);
    std::fs::write(&config.store_path, "[{").unwrap();

    let searcher = Searcher::from_config(&config).unwrap();
    let err = searcher.search("anything").await.unwrap_err();
    assert!(matches!(err, SearchError::Store(_)));
}
