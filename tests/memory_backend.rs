//! End-to-End Tests Over the In-Memory Backend
//!
//! Loads gazettes from a JSON data file, wires the real access layer and
//! router, and checks:
//! - results come back newest first
//! - territory, date and keyword filters combine
//! - pages are 1-based for callers and never overlap

use std::io::Write;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use gazette_api::config::Configuration;
use gazette_api::database::create_data_gateway;
use gazette_api::gazettes::create_gazettes_interface;
use gazette_api::http_server::{build_router, HttpServerConfig};

// =============================================================================
// Test Utilities
// =============================================================================

const DATA: &str = r#"[
    {"territory_id": "3304557", "date": "2019-02-03", "url": "http://test.com/a",
     "territory_name": "Rio de Janeiro", "state_code": "RJ",
     "source_text": "Decreto municipal de nomeação"},
    {"territory_id": "4205902", "date": "2021-01-07", "url": "https://queridodiario.ok.org.br/",
     "territory_name": "My city", "state_code": "My state",
     "source_text": "Licitação e decreto"},
    {"territory_id": "4205902", "date": "2020-06-15", "url": "http://test.com/b",
     "territory_name": "My city", "state_code": "My state",
     "source_text": "Licitação"},
    {"territory_id": "4205902", "date": "2019-12-31", "url": "http://test.com/c",
     "source_text": "Portaria"}
]"#;

/// Router backed by a freshly written data file
fn app() -> Router {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DATA.as_bytes()).unwrap();

    let config = Configuration {
        data_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let gateway = create_data_gateway(&config).unwrap();
    build_router(&HttpServerConfig::default(), create_gazettes_interface(gateway))
}

async fn get_json(app: Router, uri: &str) -> Value {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn urls(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["url"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_all_territories_newest_first() {
    let body = get_json(app(), "/gazettes").await;
    let dates: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["date"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(dates, vec!["2021-01-07", "2020-06-15", "2019-12-31", "2019-02-03"]);
}

#[tokio::test]
async fn test_territory_with_date_range() {
    let body = get_json(app(), "/gazettes/4205902?since=2020-01-01&until=2021-01-07").await;
    assert_eq!(
        urls(&body),
        vec!["https://queridodiario.ok.org.br/", "http://test.com/b"]
    );
}

#[tokio::test]
async fn test_keywords_must_all_match() {
    let body = get_json(app(), "/gazettes?keywords=decreto").await;
    assert_eq!(
        urls(&body),
        vec!["https://queridodiario.ok.org.br/", "http://test.com/a"]
    );

    let body = get_json(app(), "/gazettes?keywords=decreto&keywords=licita%C3%A7%C3%A3o").await;
    assert_eq!(urls(&body), vec!["https://queridodiario.ok.org.br/"]);
}

#[tokio::test]
async fn test_optional_fields_are_null_when_missing() {
    let body = get_json(app(), "/gazettes/4205902?until=2019-12-31").await;
    let items = body.as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert!(items[0]["territory_name"].is_null());
    assert!(items[0]["state_code"].is_null());
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let first = urls(&get_json(app(), "/gazettes?page=1&page_size=2").await);
    let second = urls(&get_json(app(), "/gazettes?page=2&page_size=2").await);
    let third = urls(&get_json(app(), "/gazettes?page=3&page_size=2").await);

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert!(third.is_empty());
    assert!(first.iter().all(|url| !second.contains(url)));
}

#[tokio::test]
async fn test_interface_is_shareable() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DATA.as_bytes()).unwrap();
    let config = Configuration {
        data_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let gazettes = create_gazettes_interface(create_data_gateway(&config).unwrap());

    let first = build_router(&HttpServerConfig::default(), Arc::clone(&gazettes));
    let second = build_router(&HttpServerConfig::default(), gazettes);

    let (a, b) = tokio::join!(
        get_json(first, "/gazettes/3304557"),
        get_json(second, "/gazettes/3304557")
    );
    assert_eq!(a, b);
}
