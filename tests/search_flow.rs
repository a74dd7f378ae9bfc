//! End-to-end tests for the paginated search flow against a mock server
//!
//! Covers auth and query-parameter construction, offset sequencing across
//! pages, empty-page handling, CSV header idempotence, the hosted-function
//! envelope, and the fatal HTTP error path.

use bizsearch::{
    error::FetchError,
    event::{handle_search_event_with, SearchEvent},
    sink::{CsvFileSink, MemorySink},
    FusionClient, Paginator, SearchQuery,
};
use serde_json::json;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn business_json(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "categories": [{"alias": "mexican", "title": "Mexican"}],
        "location": {
            "address1": "123 Main St",
            "address2": null,
            "city": "Springfield",
            "state": "IL",
            "zip_code": "62704",
            "display_address": ["123 Main St", "Springfield, IL 62704"]
        },
        "rating": 4.5,
        "review_count": 100,
        "display_phone": "(217) 555-0100",
        "url": format!("https://example.com/biz/{name}")
    })
}

fn page_json(total: u64, names: &[&str]) -> serde_json::Value {
    json!({
        "total": total,
        "businesses": names.iter().map(|n| business_json(n)).collect::<Vec<_>>()
    })
}

async fn mock_page(server: &MockServer, offset: &str, body: serde_json::Value, hits: u64) {
    Mock::given(method("GET"))
        .and(path("/v3/businesses/search"))
        .and(query_param("offset", offset))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(hits)
        .mount(server)
        .await;
}

fn test_client(server: &MockServer) -> FusionClient {
    FusionClient::new("test-key")
        .unwrap()
        .with_base_url(&server.uri())
}

#[tokio::test]
async fn search_sends_bearer_auth_and_all_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/businesses/search"))
        .and(header("authorization", "Bearer test-key"))
        .and(query_param("term", "coffee shops"))
        .and(query_param("location", "silver spring, md"))
        .and(query_param("limit", "50"))
        .and(query_param("radius", "10000"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(1, &["Solo"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = SearchQuery::new("coffee shops", "silver spring, md", 10_000).unwrap();

    let page = client.search(&query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.businesses.len(), 1);
    assert_eq!(page.businesses[0].name.as_deref(), Some("Solo"));
}

#[tokio::test]
async fn run_walks_offsets_in_order_for_a_three_page_total() {
    let server = MockServer::start().await;

    // total = 120 -> 3 pages; offset 0 is hit twice (count probe + page 0)
    mock_page(&server, "0", page_json(120, &["A1", "A2"]), 2).await;
    mock_page(&server, "50", page_json(120, &["B1"]), 1).await;
    mock_page(&server, "100", page_json(120, &["C1", "C2"]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("restaurants", "silver spring, md", 10_000).unwrap();

    let mut sink = MemorySink::new();
    let written = Paginator::new(&client).run(&query, &mut sink).await.unwrap();

    assert_eq!(written, 5);
    let names: Vec<&str> = sink.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A1", "A2", "B1", "C1", "C2"]);
}

#[tokio::test]
async fn page_count_clamps_large_totals_to_twenty() {
    let server = MockServer::start().await;
    mock_page(&server, "0", page_json(5000, &["X"]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("pizza", "10001", 10_000).unwrap();

    let pages = Paginator::new(&client).page_count(&query).await.unwrap();
    assert_eq!(pages, 20);
}

#[tokio::test]
async fn lowered_page_ceiling_stops_the_run_early() {
    let server = MockServer::start().await;

    // total = 5000 would mean 20 pages; a ceiling of 2 must stop after
    // offsets 0 and 50. Offset 0 is hit three times: the explicit
    // page_count call, run's own probe, and page 0 itself.
    mock_page(&server, "0", page_json(5000, &["A1"]), 3).await;
    mock_page(&server, "50", page_json(5000, &["B1"]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("pizza", "10001", 10_000).unwrap();
    let paginator = Paginator::new(&client).with_max_pages(2);

    assert_eq!(paginator.page_count(&query).await.unwrap(), 2);

    let mut sink = MemorySink::new();
    let written = paginator.run(&query, &mut sink).await.unwrap();

    assert_eq!(written, 2);
    let names: Vec<&str> = sink.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A1", "B1"]);
}

#[tokio::test]
async fn empty_middle_page_is_skipped_without_aborting() {
    let server = MockServer::start().await;

    mock_page(&server, "0", page_json(150, &["A1"]), 2).await;
    mock_page(&server, "50", page_json(150, &[]), 1).await;
    mock_page(&server, "100", page_json(150, &["C1"]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("tacos", "austin, tx", 10_000).unwrap();

    let mut sink = MemorySink::new();
    let written = Paginator::new(&client).run(&query, &mut sink).await.unwrap();

    assert_eq!(written, 2);
    let names: Vec<&str> = sink.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A1", "C1"]);
}

#[tokio::test]
async fn zero_total_fetches_no_pages_and_creates_no_file() {
    let server = MockServer::start().await;
    mock_page(&server, "0", page_json(0, &[]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("nothing", "nowhere", 10_000).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.csv");
    let mut sink = CsvFileSink::new(&out);

    let written = Paginator::new(&client).run(&query, &mut sink).await.unwrap();

    assert_eq!(written, 0);
    assert!(!out.exists());
}

#[tokio::test]
async fn csv_run_writes_exactly_one_header_across_pages() {
    let server = MockServer::start().await;

    mock_page(&server, "0", page_json(100, &["A1", "A2"]), 2).await;
    mock_page(&server, "50", page_json(100, &["B1"]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("restaurants", "20910", 10_000).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results.csv");
    let mut sink = CsvFileSink::new(&out);

    let written = Paginator::new(&client).run(&query, &mut sink).await.unwrap();
    assert_eq!(written, 3);

    let contents = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4); // one header + three rows
    assert!(lines[0].starts_with("name,categories,address 1"));
    assert_eq!(lines.iter().filter(|l| l.starts_with("name,")).count(), 1);
    assert!(lines[1].starts_with("A1,"));
    assert!(lines[3].starts_with("B1,"));
}

#[tokio::test]
async fn http_401_aborts_with_status_url_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/businesses/search"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error": "invalid api key"}"#),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let query = SearchQuery::new("restaurants", "20910", 10_000).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.csv");
    let mut sink = CsvFileSink::new(&out);

    let err = Paginator::new(&client)
        .run(&query, &mut sink)
        .await
        .unwrap_err();

    match &err {
        FetchError::Http { status, url, body } => {
            assert_eq!(*status, 401);
            assert!(url.contains("/v3/businesses/search"));
            assert!(body.contains("invalid api key"));
        }
        other => panic!("Expected Http error, got {other:?}"),
    }
    assert!(err.to_string().contains("Encountered HTTP error 401 on"));
    assert!(!out.exists());
}

#[tokio::test]
async fn concurrent_collection_preserves_page_order() {
    let server = MockServer::start().await;

    mock_page(&server, "0", page_json(150, &["A1"]), 2).await;
    // Delay the middle page so a later page can finish first
    Mock::given(method("GET"))
        .and(path("/v3/businesses/search"))
        .and(query_param("offset", "50"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_json(150, &["B1"]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mock_page(&server, "100", page_json(150, &["C1"]), 1).await;

    let client = test_client(&server);
    let query = SearchQuery::new("tacos", "78701", 10_000).unwrap();

    let rows = Paginator::new(&client)
        .collect_concurrent(&query, 3)
        .await
        .unwrap();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A1", "B1", "C1"]);
}

#[tokio::test]
async fn event_handler_converts_miles_and_wraps_rows_in_envelope() {
    let server = MockServer::start().await;

    // 5 miles -> 8045 meters on the wire
    Mock::given(method("GET"))
        .and(path("/v3/businesses/search"))
        .and(header("authorization", "Bearer event-key"))
        .and(query_param("radius", "8045"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(2, &["E1", "E2"])))
        .expect(2)
        .mount(&server)
        .await;

    let event = SearchEvent {
        query: "tacos".to_string(),
        zip: "78701".to_string(),
        yelp_key: "event-key".to_string(),
        radius: 5,
    };

    let response = handle_search_event_with(event, Some(&server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body.len(), 2);
    assert_eq!(response.body[0].name, "E1");

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["statusCode"], 200);
    assert_eq!(json["body"][1]["name"], "E2");
}
