//! Functional tests for the HTTP fetch layer

use std::collections::HashMap;

use painel::filter::SearchEngine;
use painel::record::{SnapshotIndex, ID_COLUMN};
use painel::{Client, PainelError};

use crate::common::{sample_data, TestServer};

#[test]
fn test_load_records_over_http() {
    let server = TestServer::start(sample_data::full_routes());
    let client = Client::new(server.base_url());

    let set = client.load_records("opcao_status_summary.csv").unwrap();
    assert_eq!(set.last_update.as_deref(), Some("2024-03-10 08:30"));
    assert_eq!(set.headers, vec!["OPÇÃO", "CARGO", "Convocado", "Aceitou"]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.records[1].get("CARGO"), "Médico");
}

#[test]
fn test_summary_search_targets_option_column() {
    let server = TestServer::start(sample_data::full_routes());
    let client = Client::new(server.base_url());

    let set = client.load_records("opcao_status_summary.csv").unwrap();
    let engine = SearchEngine::with_columns(ID_COLUMN, ID_COLUMN);

    // Digit terms substring-match the option id
    let hits = engine.search(&set.records, "1");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].get(ID_COLUMN), "10");
    assert_eq!(hits[1].get(ID_COLUMN), "1");

    // Text terms also resolve against the id column, not role names
    assert!(engine.search(&set.records, "analista").is_empty());
}

#[test]
fn test_load_json_over_http() {
    let server = TestServer::start(sample_data::full_routes());
    let client = Client::new(server.base_url());

    let index: SnapshotIndex = client.load_json("diff_index.json").unwrap();
    assert_eq!(index.diffs.len(), 2);
}

#[test]
fn test_missing_resource_names_the_resource() {
    let server = TestServer::start(HashMap::new());
    let client = Client::new(server.base_url());

    let err = client.load_records("nope.csv").unwrap_err();
    match err {
        PainelError::Transport { resource, .. } => assert_eq!(resource, "nope.csv"),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn test_unreachable_host_is_a_transport_error() {
    // Port 9 on loopback is the discard port; nothing listens there
    let client = Client::new("http://127.0.0.1:9");
    let err = client.fetch_text("x.csv").unwrap_err();
    assert!(matches!(err, PainelError::Transport { .. }));
}

#[test]
fn test_every_request_carries_a_fresh_cache_token() {
    let server = TestServer::start(sample_data::full_routes());
    let client = Client::new(server.base_url());

    client.fetch_text("diff_index.json").unwrap();
    client.fetch_text("diff_index.json").unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(request.contains("?v="), "request {:?} lacks cache token", request);
    }
    assert_ne!(requests[0], requests[1]);
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    let mut routes = HashMap::new();
    routes.insert("/bad.json".to_string(), "{not json".to_string());
    let server = TestServer::start(routes);
    let client = Client::new(server.base_url());

    let err = client.load_json::<SnapshotIndex>("bad.json").unwrap_err();
    assert!(matches!(err, PainelError::Json(_)));
}
