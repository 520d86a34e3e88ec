//! Google Analytics Data API (v1beta1) adapter.
//!
//! Fetches `runReport` over (date x source x medium) dimensions with seven
//! metrics, and a `runRealtimeReport` snapshot. Row values all arrive as
//! strings inside `dimensionValues`/`metricValues` envelopes.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use martview_core::{
    AnalyticsMetrics, AppConfig, DailyTraffic, DateRange, Fetched, RealtimeSnapshot,
};

use crate::error::ConnectorError;
use crate::fallback;
use crate::parse;
use crate::util::{join_url, parse_base_url};

const DEFAULT_BASE_URL: &str = "https://analyticsdata.googleapis.com/";
const DEFAULT_USER_AGENT: &str = "martview/0.1 (client-reporting)";

/// Metric order requested in `runReport`; normalization indexes into
/// `metricValues` by this order.
const REPORT_METRICS: [&str; 7] = [
    "totalUsers",
    "sessions",
    "screenPageViews",
    "bounceRate",
    "averageSessionDuration",
    "conversions",
    "totalRevenue",
];

/// Client for the Google Analytics Data API.
///
/// Holds an optional pre-issued OAuth access token; when the token is absent
/// every fetch short-circuits to the fallback dataset without a network call.
pub struct GoogleAnalyticsClient {
    http: Client,
    access_token: Option<String>,
    base_url: Url,
}

impl GoogleAnalyticsClient {
    /// Creates a client pointed at the production Analytics Data API.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ConnectorError> {
        Self::build(
            config.google_analytics_access_token.as_deref(),
            config.http_timeout_secs,
            &config.http_user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ConnectorError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        access_token: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ConnectorError> {
        Self::build(access_token, timeout_secs, DEFAULT_USER_AGENT, base_url)
    }

    fn build(
        access_token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ConnectorError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            http,
            access_token: access_token.map(ToOwned::to_owned),
            base_url,
        })
    }

    /// Fetches and normalizes the windowed site report for a property.
    ///
    /// Never fails: missing credentials, provider errors, and empty result
    /// sets all produce the fallback dataset.
    pub async fn get_analytics_data(
        &self,
        property_id: &str,
        range: &DateRange,
    ) -> Fetched<AnalyticsMetrics> {
        let Some(token) = self.access_token.clone() else {
            tracing::debug!(
                platform = "google_analytics",
                property_id,
                "no access token configured, serving fallback dataset"
            );
            return Fetched::fallback(fallback::google_analytics());
        };

        match self.run_report(&token, property_id, range).await {
            Ok(metrics) => {
                tracing::debug!(
                    platform = "google_analytics",
                    property_id,
                    rows = metrics.daily_data.len(),
                    "analytics report fetched"
                );
                Fetched::live(metrics)
            }
            Err(e) => {
                tracing::warn!(
                    platform = "google_analytics",
                    property_id,
                    error = %e,
                    "analytics report fetch failed, serving fallback dataset"
                );
                Fetched::fallback(fallback::google_analytics())
            }
        }
    }

    /// Fetches the realtime active-user snapshot for a property.
    ///
    /// Same degradation guarantee as [`Self::get_analytics_data`], with its
    /// own small fallback.
    pub async fn get_realtime_snapshot(&self, property_id: &str) -> Fetched<RealtimeSnapshot> {
        let Some(token) = self.access_token.clone() else {
            tracing::debug!(
                platform = "google_analytics",
                property_id,
                "no access token configured, serving realtime fallback"
            );
            return Fetched::fallback(fallback::google_analytics_realtime());
        };

        match self.run_realtime_report(&token, property_id).await {
            Ok(snapshot) => Fetched::live(snapshot),
            Err(e) => {
                tracing::warn!(
                    platform = "google_analytics",
                    property_id,
                    error = %e,
                    "realtime report fetch failed, serving fallback"
                );
                Fetched::fallback(fallback::google_analytics_realtime())
            }
        }
    }

    async fn run_report(
        &self,
        token: &str,
        property_id: &str,
        range: &DateRange,
    ) -> Result<AnalyticsMetrics, ConnectorError> {
        let url = join_url(&self.base_url, &format!("v1beta1/properties/{property_id}:runReport"))?;
        let metrics: Vec<_> = REPORT_METRICS
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect();
        let body = serde_json::json!({
            "dateRanges": [{ "startDate": range.start_date, "endDate": range.end_date }],
            "dimensions": [
                { "name": "date" },
                { "name": "sessionSource" },
                { "name": "sessionMedium" }
            ],
            "metrics": metrics,
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let report: RunReportResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("runReport(property={property_id})"),
                source: e,
            })?;

        if report.rows.is_empty() {
            return Err(ConnectorError::Api("report contained no rows".to_string()));
        }
        Ok(normalize_report(&report.rows))
    }

    async fn run_realtime_report(
        &self,
        token: &str,
        property_id: &str,
    ) -> Result<RealtimeSnapshot, ConnectorError> {
        let url = join_url(
            &self.base_url,
            &format!("v1beta1/properties/{property_id}:runRealtimeReport"),
        )?;
        let body = serde_json::json!({
            "metrics": [{ "name": "activeUsers" }, { "name": "screenPageViews" }],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let report: RunReportResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("runRealtimeReport(property={property_id})"),
                source: e,
            })?;

        if report.rows.is_empty() {
            return Err(ConnectorError::Api(
                "realtime report contained no rows".to_string(),
            ));
        }
        Ok(normalize_realtime(&report.rows))
    }
}

#[derive(Debug, Deserialize)]
struct RunReportResponse {
    #[serde(default)]
    rows: Vec<ReportRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportRow {
    #[serde(default)]
    dimension_values: Vec<WireValue>,
    #[serde(default)]
    metric_values: Vec<WireValue>,
}

#[derive(Debug, Deserialize, Default)]
struct WireValue {
    #[serde(default)]
    value: String,
}

impl ReportRow {
    fn dimension(&self, index: usize) -> &str {
        self.dimension_values
            .get(index)
            .map_or("", |v| v.value.as_str())
    }

    fn metric(&self, index: usize) -> &str {
        self.metric_values
            .get(index)
            .map_or("", |v| v.value.as_str())
    }
}

/// Accumulates all (date x source x medium) rows into site-level metrics.
///
/// Bounce rate arrives as a 0-1 fraction and is converted to a percentage;
/// it and session duration are averaged over the row count. Each row appends
/// one `daily_data` entry in row order, with no date deduplication.
#[allow(clippy::cast_precision_loss)]
fn normalize_report(rows: &[ReportRow]) -> AnalyticsMetrics {
    let mut metrics = AnalyticsMetrics {
        total_users: 0,
        sessions: 0,
        page_views: 0,
        bounce_rate: 0.0,
        avg_session_duration: 0.0,
        conversions: 0.0,
        revenue: 0.0,
        traffic_sources: std::collections::BTreeMap::new(),
        daily_data: Vec::with_capacity(rows.len()),
    };
    let mut bounce_sum = 0.0;
    let mut duration_sum = 0.0;

    for row in rows {
        let users = parse::u64_field(row.metric(0));
        let sessions = parse::u64_field(row.metric(1));
        let page_views = parse::u64_field(row.metric(2));
        bounce_sum += parse::f64_field(row.metric(3)) * 100.0;
        duration_sum += parse::f64_field(row.metric(4));
        metrics.conversions += parse::f64_field(row.metric(5));
        metrics.revenue += parse::f64_field(row.metric(6));

        metrics.total_users += users;
        metrics.sessions += sessions;
        metrics.page_views += page_views;

        let source_key = format!("{}/{}", row.dimension(1), row.dimension(2));
        let entry = metrics.traffic_sources.entry(source_key).or_default();
        entry.users += users;
        entry.sessions += sessions;
        entry.page_views += page_views;

        metrics.daily_data.push(DailyTraffic {
            date: row.dimension(0).to_string(),
            users,
            sessions,
            page_views,
        });
    }

    if !rows.is_empty() {
        let count = rows.len() as f64;
        metrics.bounce_rate = bounce_sum / count;
        metrics.avg_session_duration = duration_sum / count;
    }
    metrics
}

fn normalize_realtime(rows: &[ReportRow]) -> RealtimeSnapshot {
    let mut snapshot = RealtimeSnapshot {
        active_users: 0,
        page_views: 0,
    };
    for row in rows {
        snapshot.active_users += parse::u64_field(row.metric(0));
        snapshot.page_views += parse::u64_field(row.metric(1));
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(dims: &[&str], mets: &[&str]) -> ReportRow {
        ReportRow {
            dimension_values: dims
                .iter()
                .map(|v| WireValue {
                    value: (*v).to_string(),
                })
                .collect(),
            metric_values: mets
                .iter()
                .map(|v| WireValue {
                    value: (*v).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn normalize_accumulates_across_rows() {
        let rows = vec![
            row(
                &["20260301", "google", "organic"],
                &["120", "140", "360", "0.48", "95.0", "6", "410.00"],
            ),
            row(
                &["20260301", "(direct)", "(none)"],
                &["40", "45", "90", "0.62", "41.0", "1", "55.00"],
            ),
            row(
                &["20260302", "google", "organic"],
                &["130", "150", "380", "0.50", "88.0", "4", "270.00"],
            ),
        ];
        let metrics = normalize_report(&rows);

        assert_eq!(metrics.total_users, 290);
        assert_eq!(metrics.sessions, 335);
        assert_eq!(metrics.page_views, 830);
        assert!((metrics.conversions - 11.0).abs() < 1e-9);
        assert!((metrics.revenue - 735.0).abs() < 1e-9);

        // Fractions averaged over 3 rows, expressed as percentages.
        let expected_bounce = (48.0 + 62.0 + 50.0) / 3.0;
        assert!((metrics.bounce_rate - expected_bounce).abs() < 1e-9);
        let expected_duration = (95.0 + 41.0 + 88.0) / 3.0;
        assert!((metrics.avg_session_duration - expected_duration).abs() < 1e-9);
    }

    #[test]
    fn normalize_builds_traffic_source_map() {
        let rows = vec![
            row(
                &["20260301", "google", "organic"],
                &["120", "140", "360", "0.5", "90", "0", "0"],
            ),
            row(
                &["20260302", "google", "organic"],
                &["130", "150", "380", "0.5", "90", "0", "0"],
            ),
        ];
        let metrics = normalize_report(&rows);
        let source = metrics
            .traffic_sources
            .get("google/organic")
            .expect("source present");
        assert_eq!(source.users, 250);
        assert_eq!(source.sessions, 290);
        assert_eq!(source.page_views, 740);
    }

    #[test]
    fn normalize_appends_daily_entry_per_row_without_dedup() {
        // Same date under two sources: two daily entries, by design.
        let rows = vec![
            row(
                &["20260301", "google", "organic"],
                &["120", "140", "360", "0.5", "90", "0", "0"],
            ),
            row(
                &["20260301", "(direct)", "(none)"],
                &["40", "45", "90", "0.5", "90", "0", "0"],
            ),
        ];
        let metrics = normalize_report(&rows);
        assert_eq!(metrics.daily_data.len(), 2);
        assert_eq!(metrics.daily_data[0].date, "20260301");
        assert_eq!(metrics.daily_data[1].date, "20260301");
        assert_eq!(metrics.daily_data[1].users, 40);
    }

    #[test]
    fn normalize_handles_missing_values_as_zero() {
        let rows = vec![row(&["20260301", "google", "organic"], &["abc"])];
        let metrics = normalize_report(&rows);
        assert_eq!(metrics.total_users, 0);
        assert_eq!(metrics.sessions, 0);
        assert_eq!(metrics.daily_data.len(), 1);
    }

    #[test]
    fn normalize_realtime_sums_rows() {
        let rows = vec![row(&[], &["30", "80"]), row(&[], &["12", "48"])];
        let snapshot = normalize_realtime(&rows);
        assert_eq!(snapshot.active_users, 42);
        assert_eq!(snapshot.page_views, 128);
    }
}
