//! Google Ads API adapter (GAQL over `googleAds:search`).
//!
//! Costs arrive in micros (1,000,000 micros per currency unit) and are
//! divided down before they appear anywhere. The per-campaign `roi` field
//! carries spend per conversion; that labeling matches the report contract
//! consumers already depend on.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use martview_core::{
    cost_per_conversion, ratio_cpc, AppConfig, CampaignMetrics, DateRange, Fetched, KeywordMetrics,
    PlatformCampaignReport,
};

use crate::error::ConnectorError;
use crate::fallback;
use crate::util::{join_url, parse_base_url};
use crate::parse;

const DEFAULT_BASE_URL: &str = "https://googleads.googleapis.com/";
const DEFAULT_USER_AGENT: &str = "martview/0.1 (client-reporting)";

/// OAuth access token plus developer token; both are required before any
/// live call is attempted.
#[derive(Clone)]
struct GoogleAdsCredentials {
    access_token: String,
    developer_token: String,
    login_customer_id: Option<String>,
}

/// Client for the Google Ads reporting API.
pub struct GoogleAdsClient {
    http: Client,
    credentials: Option<GoogleAdsCredentials>,
    base_url: Url,
}

impl GoogleAdsClient {
    /// Creates a client pointed at the production Google Ads API.
    ///
    /// Credentials are only considered configured when both the access token
    /// and the developer token are present.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ConnectorError> {
        let credentials = match (
            config.google_ads_access_token.as_deref(),
            config.google_ads_developer_token.as_deref(),
        ) {
            (Some(access_token), Some(developer_token)) => Some(GoogleAdsCredentials {
                access_token: access_token.to_owned(),
                developer_token: developer_token.to_owned(),
                login_customer_id: config.google_ads_login_customer_id.clone(),
            }),
            _ => None,
        };
        Self::build(
            credentials,
            config.http_timeout_secs,
            &config.http_user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// Passing `None` for either token leaves the client credential-less, so
    /// every fetch serves fallback data.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ConnectorError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        access_token: Option<&str>,
        developer_token: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ConnectorError> {
        let credentials = match (access_token, developer_token) {
            (Some(access_token), Some(developer_token)) => Some(GoogleAdsCredentials {
                access_token: access_token.to_owned(),
                developer_token: developer_token.to_owned(),
                login_customer_id: None,
            }),
            _ => None,
        };
        Self::build(credentials, timeout_secs, DEFAULT_USER_AGENT, base_url)
    }

    fn build(
        credentials: Option<GoogleAdsCredentials>,
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
            credentials,
            base_url,
        })
    }

    /// Fetches and normalizes campaign performance for a customer.
    ///
    /// Never fails: missing credentials, provider errors, and empty result
    /// sets all produce the fallback dataset.
    pub async fn get_campaign_data(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport> {
        let Some(credentials) = self.credentials.clone() else {
            tracing::debug!(
                platform = "google_ads",
                customer_id,
                "credentials not configured, serving fallback dataset"
            );
            return Fetched::fallback(fallback::google_ads_campaigns());
        };

        match self.fetch_campaigns(&credentials, customer_id, range).await {
            Ok(report) => {
                tracing::debug!(
                    platform = "google_ads",
                    customer_id,
                    campaigns = report.campaigns.len(),
                    "campaign performance fetched"
                );
                Fetched::live(report)
            }
            Err(e) => {
                tracing::warn!(
                    platform = "google_ads",
                    customer_id,
                    error = %e,
                    "campaign performance fetch failed, serving fallback dataset"
                );
                Fetched::fallback(fallback::google_ads_campaigns())
            }
        }
    }

    /// Fetches keyword performance from `keyword_view`.
    pub async fn get_keyword_performance(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Fetched<Vec<KeywordMetrics>> {
        let Some(credentials) = self.credentials.clone() else {
            tracing::debug!(
                platform = "google_ads",
                customer_id,
                "credentials not configured, serving keyword fallback"
            );
            return Fetched::fallback(fallback::google_ads_keywords());
        };

        match self.fetch_keywords(&credentials, customer_id, range).await {
            Ok(keywords) => Fetched::live(keywords),
            Err(e) => {
                tracing::warn!(
                    platform = "google_ads",
                    customer_id,
                    error = %e,
                    "keyword performance fetch failed, serving fallback"
                );
                Fetched::fallback(fallback::google_ads_keywords())
            }
        }
    }

    async fn fetch_campaigns(
        &self,
        credentials: &GoogleAdsCredentials,
        customer_id: &str,
        range: &DateRange,
    ) -> Result<PlatformCampaignReport, ConnectorError> {
        let query = format!(
            "SELECT campaign.name, metrics.impressions, metrics.clicks, \
             metrics.cost_micros, metrics.conversions, metrics.ctr, metrics.average_cpm \
             FROM campaign WHERE segments.date BETWEEN '{}' AND '{}'",
            range.start_date, range.end_date
        );
        let rows = self.search(credentials, customer_id, &query).await?;
        if rows.is_empty() {
            return Err(ConnectorError::Api(
                "campaign query returned no results".to_string(),
            ));
        }
        Ok(normalize_campaigns(rows))
    }

    async fn fetch_keywords(
        &self,
        credentials: &GoogleAdsCredentials,
        customer_id: &str,
        range: &DateRange,
    ) -> Result<Vec<KeywordMetrics>, ConnectorError> {
        let query = format!(
            "SELECT ad_group_criterion.keyword.text, \
             ad_group_criterion.quality_info.quality_score, metrics.impressions, \
             metrics.clicks, metrics.cost_micros, metrics.conversions, metrics.ctr \
             FROM keyword_view WHERE segments.date BETWEEN '{}' AND '{}'",
            range.start_date, range.end_date
        );
        let rows = self.search(credentials, customer_id, &query).await?;
        if rows.is_empty() {
            return Err(ConnectorError::Api(
                "keyword query returned no results".to_string(),
            ));
        }
        Ok(normalize_keywords(rows))
    }

    async fn search(
        &self,
        credentials: &GoogleAdsCredentials,
        customer_id: &str,
        query: &str,
    ) -> Result<Vec<SearchRow>, ConnectorError> {
        let url = join_url(
            &self.base_url,
            &format!("v17/customers/{customer_id}/googleAds:search"),
        )?;
        let mut request = self
            .http
            .post(url)
            .bearer_auth(&credentials.access_token)
            .header("developer-token", &credentials.developer_token)
            .json(&serde_json::json!({ "query": query }));
        if let Some(login_customer_id) = &credentials.login_customer_id {
            request = request.header("login-customer-id", login_customer_id);
        }

        let response = request.send().await?.error_for_status()?;
        let raw = response.text().await?;
        let search: SearchResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("googleAds:search(customer={customer_id})"),
                source: e,
            })?;
        Ok(search.results)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRow {
    #[serde(default)]
    campaign: Option<CampaignRef>,
    #[serde(default)]
    ad_group_criterion: Option<AdGroupCriterion>,
    #[serde(default)]
    metrics: WireMetrics,
}

#[derive(Debug, Deserialize)]
struct CampaignRef {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdGroupCriterion {
    #[serde(default)]
    keyword: Option<KeywordRef>,
    #[serde(default)]
    quality_info: Option<QualityInfo>,
}

#[derive(Debug, Deserialize)]
struct KeywordRef {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QualityInfo {
    #[serde(default)]
    quality_score: u8,
}

/// The REST transport encodes int64 metrics as strings and doubles as
/// numbers; `serde_json::Value` fields absorb both.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMetrics {
    #[serde(default)]
    impressions: serde_json::Value,
    #[serde(default)]
    clicks: serde_json::Value,
    #[serde(default)]
    cost_micros: serde_json::Value,
    #[serde(default)]
    conversions: f64,
    /// 0-1 fraction on the wire.
    #[serde(default)]
    ctr: f64,
}

/// Accumulates campaign rows keyed by campaign name. Spend is converted
/// from micros before accumulation; ratios and the `roi` (spend per
/// conversion) field are derived from the accumulated counters.
fn normalize_campaigns(rows: Vec<SearchRow>) -> PlatformCampaignReport {
    let mut by_name: BTreeMap<String, CampaignMetrics> = BTreeMap::new();

    for row in rows {
        let name = row.campaign.map(|c| c.name).unwrap_or_default();
        let campaign = by_name
            .entry(name.clone())
            .or_insert_with(|| CampaignMetrics::from_raw(name, 0, 0, 0.0));
        campaign.impressions += parse::u64_value(&row.metrics.impressions);
        campaign.clicks += parse::u64_value(&row.metrics.clicks);
        campaign.spend += parse::micros_to_currency(parse::u64_value(&row.metrics.cost_micros));
        campaign.conversions += row.metrics.conversions;
    }

    let mut campaigns: Vec<CampaignMetrics> = by_name.into_values().collect();
    for campaign in &mut campaigns {
        campaign.derive_ratios();
        campaign.roi = Some(cost_per_conversion(campaign.spend, campaign.conversions));
    }

    let mut report = PlatformCampaignReport::from_campaigns(campaigns);
    report.summary.overall_roi = Some(cost_per_conversion(
        report.summary.total_spend,
        report.summary.total_conversions,
    ));
    report
}

/// Maps keyword rows one-to-one; the wire CTR fraction becomes a
/// percentage, and spend converts from micros.
fn normalize_keywords(rows: Vec<SearchRow>) -> Vec<KeywordMetrics> {
    rows.into_iter()
        .map(|row| {
            let (keyword, quality_score) = row.ad_group_criterion.map_or_else(
                || (String::new(), None),
                |criterion| {
                    (
                        criterion.keyword.map(|k| k.text).unwrap_or_default(),
                        criterion.quality_info.map(|q| q.quality_score),
                    )
                },
            );
            let impressions = parse::u64_value(&row.metrics.impressions);
            let clicks = parse::u64_value(&row.metrics.clicks);
            let spend = parse::micros_to_currency(parse::u64_value(&row.metrics.cost_micros));
            KeywordMetrics {
                keyword,
                impressions,
                clicks,
                spend,
                conversions: row.metrics.conversions,
                ctr: row.metrics.ctr * 100.0,
                cpc: ratio_cpc(spend, clicks),
                quality_score,
            }
        })
        .collect()
}
