//! Integration tests for `GoogleAnalyticsClient` using wiremock HTTP mocks.

use martview_connectors::{fallback, GoogleAnalyticsClient};
use martview_core::{DateRange, FetchOutcome};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GoogleAnalyticsClient {
    GoogleAnalyticsClient::with_base_url(Some("test-token"), 30, base_url)
        .expect("client construction should not fail")
}

fn march_2026() -> DateRange {
    DateRange::new("2026-03-01", "2026-03-31")
}

fn report_row(date: &str, source: &str, medium: &str, metrics: [&str; 7]) -> serde_json::Value {
    serde_json::json!({
        "dimensionValues": [
            { "value": date },
            { "value": source },
            { "value": medium }
        ],
        "metricValues": metrics.iter().map(|m| serde_json::json!({ "value": m })).collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn run_report_normalizes_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "rows": [
            report_row(
                "20260301",
                "google",
                "organic",
                ["120", "140", "360", "0.48", "95.0", "6", "410.00"],
            ),
            report_row(
                "20260301",
                "(direct)",
                "(none)",
                ["40", "45", "90", "0.62", "41.0", "1", "55.00"],
            ),
        ],
        "rowCount": 2
    });

    Mock::given(method("POST"))
        .and(path("/v1beta1/properties/123456789:runReport"))
        .and(body_partial_json(serde_json::json!({
            "dateRanges": [{ "startDate": "2026-03-01", "endDate": "2026-03-31" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_analytics_data("123456789", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Live);
    let metrics = fetched.data;
    assert_eq!(metrics.total_users, 160);
    assert_eq!(metrics.sessions, 185);
    assert_eq!(metrics.page_views, 450);
    assert!((metrics.conversions - 7.0).abs() < 1e-9);
    assert!((metrics.revenue - 465.0).abs() < 1e-9);
    assert!((metrics.bounce_rate - 55.0).abs() < 1e-9);
    assert_eq!(metrics.traffic_sources.len(), 2);
    assert_eq!(metrics.daily_data.len(), 2);
}

#[tokio::test]
async fn provider_error_returns_exact_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_analytics_data("123456789", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::google_analytics());
}

#[tokio::test]
async fn empty_result_set_returns_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "rowCount": 0 })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_analytics_data("123456789", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::google_analytics());
}

#[tokio::test]
async fn missing_credentials_skip_the_network_entirely() {
    // No mocks mounted: any request would fail the test via the 404 path
    // producing a different assertion, and wiremock verifies received
    // requests on drop.
    let server = MockServer::start().await;
    let client = GoogleAnalyticsClient::with_base_url(None, 30, &server.uri())
        .expect("client construction should not fail");

    let fetched = client.get_analytics_data("123456789", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::google_analytics());
    assert!(server.received_requests().await.expect("recording enabled").is_empty());
}

#[tokio::test]
async fn failure_payload_matches_no_credential_payload() {
    let failing = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing)
        .await;

    let with_token = test_client(&failing.uri());
    let without_token = GoogleAnalyticsClient::with_base_url(None, 30, &failing.uri())
        .expect("client construction should not fail");

    let from_failure = with_token.get_analytics_data("123456789", &march_2026()).await;
    let from_absence = without_token.get_analytics_data("123456789", &march_2026()).await;

    assert_eq!(from_failure.data, from_absence.data);
    assert_eq!(from_failure.outcome, FetchOutcome::Fallback);
    assert_eq!(from_absence.outcome, FetchOutcome::Fallback);
}

#[tokio::test]
async fn realtime_snapshot_sums_rows() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "rows": [
            { "metricValues": [{ "value": "30" }, { "value": "80" }] },
            { "metricValues": [{ "value": "12" }, { "value": "48" }] }
        ]
    });

    Mock::given(method("POST"))
        .and(path("/v1beta1/properties/123456789:runRealtimeReport"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_realtime_snapshot("123456789").await;

    assert_eq!(fetched.outcome, FetchOutcome::Live);
    assert_eq!(fetched.data.active_users, 42);
    assert_eq!(fetched.data.page_views, 128);
}

#[tokio::test]
async fn realtime_failure_returns_small_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_realtime_snapshot("123456789").await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::google_analytics_realtime());
}
