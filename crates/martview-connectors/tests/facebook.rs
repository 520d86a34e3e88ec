//! Integration tests for `FacebookClient` using wiremock HTTP mocks.

use martview_connectors::{fallback, FacebookClient};
use martview_core::{DateRange, FetchOutcome};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> FacebookClient {
    FacebookClient::with_base_url(Some("test-token"), 30, base_url)
        .expect("client construction should not fail")
}

fn march_2026() -> DateRange {
    DateRange::new("2026-03-01", "2026-03-31")
}

#[tokio::test]
async fn campaign_insights_normalize_string_metrics() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "campaign_name": "Spring Sale - Conversions",
                "impressions": "125000",
                "clicks": "12400",
                "spend": "6500.00",
                "reach": "98000",
                "frequency": "1.28",
                "actions": [
                    { "action_type": "purchase", "value": "62" },
                    { "action_type": "lead", "value": "24" },
                    { "action_type": "link_click", "value": "9100" }
                ]
            },
            {
                "campaign_name": "Brand Awareness - Reach",
                "impressions": "89000",
                "clicks": "8800",
                "spend": "4700.00",
                "reach": "71500",
                "frequency": "1.24",
                "actions": [
                    { "action_type": "lead", "value": "41" },
                    { "action_type": "post_engagement", "value": "15200" }
                ]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/act_987654/insights"))
        .and(query_param("level", "campaign"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_campaign_data("987654", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Live);
    let report = fetched.data;
    assert_eq!(report.campaigns.len(), 2);
    assert_eq!(report.summary.total_impressions, 214_000);
    assert_eq!(report.summary.total_clicks, 21_200);
    assert!((report.summary.total_spend - 11_200.0).abs() < 1e-9);
    assert_eq!(report.summary.total_reach, Some(169_500));
    // Only purchase and lead actions count as conversions.
    assert!((report.summary.total_conversions - 127.0).abs() < 1e-9);
    // Overall CTR recomputed from totals: 21200/214000*100.
    assert!((report.summary.overall_ctr - 9.906_542_056_074_766).abs() < 1e-9);
}

#[tokio::test]
async fn provider_error_returns_exact_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "message": "Invalid OAuth access token", "code": 190 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_campaign_data("987654", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::facebook_campaigns());
}

#[tokio::test]
async fn empty_insights_return_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_campaign_data("987654", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::facebook_campaigns());
}

#[tokio::test]
async fn missing_credentials_return_fallback_without_network() {
    let server = MockServer::start().await;
    let client = FacebookClient::with_base_url(None, 30, &server.uri())
        .expect("client construction should not fail");

    let fetched = client.get_campaign_data("987654", &march_2026()).await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::facebook_campaigns());
    assert!(server.received_requests().await.expect("recording enabled").is_empty());
}

#[tokio::test]
async fn page_insights_parse_metric_series() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "data": [
            {
                "name": "page_impressions",
                "period": "day",
                "values": [{ "value": 21000 }, { "value": 24200 }]
            },
            {
                "name": "page_engaged_users",
                "period": "day",
                "values": [{ "value": 1870 }, { "value": 2000 }]
            },
            {
                "name": "page_fans",
                "period": "lifetime",
                "values": [{ "value": 12400 }, { "value": 12450 }]
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/112233/insights"))
        .and(query_param("metric", "page_impressions,page_engaged_users,page_fans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_page_insights("112233").await;

    assert_eq!(fetched.outcome, FetchOutcome::Live);
    assert_eq!(fetched.data.page_impressions, 45_200);
    assert_eq!(fetched.data.page_engaged_users, 3870);
    assert_eq!(fetched.data.page_fans, 12_450);
}

#[tokio::test]
async fn page_insights_failure_returns_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let fetched = client.get_page_insights("112233").await;

    assert_eq!(fetched.outcome, FetchOutcome::Fallback);
    assert_eq!(fetched.data, fallback::facebook_page_insights());
}
