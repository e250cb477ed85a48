//! HttpRecordSource against a local directory API
//!
//! A warp server on an ephemeral port stands in for the real API so the
//! request paths, status handling and decoding run over actual HTTP.

use roster_client::{fetch_record, ClientConfig, FetchError, HttpRecordSource, RecordSource};
use roster_model::{Company, RecordId, SearchQuery, SearchType};
use std::time::Duration;
use warp::http::Response;
use warp::path::FullPath;
use warp::Filter;

fn json_response(status: u16, body: &str) -> Response<String> {
    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(body.to_string())
        .unwrap()
}

async fn respond(path: FullPath, query: String) -> Response<String> {
    match path.as_str() {
        "/api/v1/companies/1/" => json_response(
            200,
            r#"{"id": 1, "name": "Acme Corporation", "description": "Widgets",
                "active": false, "employees": [], "deals": []}"#,
        ),
        "/api/v1/companies/2/" => json_response(200, r#"{"id": "two""#),
        "/api/v1/companies/3/" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            json_response(200, "{}")
        }
        "/api/v1/search/" => {
            // Echo the received query string back as the subtitle.
            let body = serde_json::json!({
                "sections": [{
                    "title": "Companies",
                    "count": 1,
                    "results": [{
                        "title": "Acme Corporation",
                        "subtitle": query,
                        "id": 1,
                        "url": "/companies/1"
                    }]
                }]
            });
            json_response(200, &body.to_string())
        }
        _ => json_response(404, r#"{"detail": "Not found."}"#),
    }
}

async fn spawn_api() -> String {
    let routes = warp::get()
        .and(warp::path::full())
        .and(warp::query::raw().or(warp::any().map(String::new)).unify())
        .then(respond);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{addr}")
}

async fn source_with_timeout(timeout_secs: u64) -> HttpRecordSource {
    let base_url = spawn_api().await;
    let config = ClientConfig::new()
        .with_base_url(base_url)
        .with_timeout_secs(timeout_secs);
    HttpRecordSource::new(&config).unwrap()
}

#[tokio::test]
async fn fetches_and_decodes_company() {
    let source = source_with_timeout(5).await;

    let company: Company = fetch_record(&source, RecordId(1)).await.unwrap();
    assert_eq!(company.name, "Acme Corporation");
    assert!(!company.active);
    assert!(company.employees.is_empty());
}

#[tokio::test]
async fn non_2xx_is_status_error() {
    let source = source_with_timeout(5).await;

    let err = fetch_record::<Company>(&source, RecordId(404)).await.unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");
    assert!(err.url().ends_with("/api/v1/companies/404/"));
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let source = source_with_timeout(5).await;

    let err = source.fetch_json("/companies/2/").await.unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn slow_response_is_timeout() {
    let source = source_with_timeout(1).await;

    let err = source.fetch_json("/companies/3/").await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    let config = ClientConfig::new()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout_secs(2);
    let source = HttpRecordSource::new(&config).unwrap();

    let err = source.fetch_json("/companies/1/").await.unwrap_err();
    assert!(
        matches!(err, FetchError::Transport { .. } | FetchError::Timeout { .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn search_sends_query_pairs() {
    let source = source_with_timeout(5).await;
    let query = SearchQuery::new("acme").with_type(SearchType::Companies);

    let results = source.search(&query).await.unwrap();
    let hit = &results.sections[0].results[0];
    assert_eq!(hit.subtitle.as_deref(), Some("q=acme&type=companies&size=10"));
}
