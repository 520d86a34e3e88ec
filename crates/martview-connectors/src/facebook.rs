//! Facebook Marketing (Graph API v18.0) adapter.
//!
//! Campaign insights come from `/act_{id}/insights` at campaign level, page
//! metrics from `/{page_id}/insights`. The Graph API encodes every numeric
//! metric as a JSON string, so all fields parse through [`crate::parse`].

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use martview_core::{
    AppConfig, CampaignMetrics, DateRange, FacebookPageInsights, Fetched, PlatformCampaignReport,
};

use crate::error::ConnectorError;
use crate::fallback;
use crate::util::{join_url, parse_base_url};
use crate::parse;

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v18.0/";
const DEFAULT_USER_AGENT: &str = "martview/0.1 (client-reporting)";

/// Action types that count as conversions; every other `action_type` in the
/// insights response is ignored.
const CONVERSION_ACTION_TYPES: [&str; 2] = ["purchase", "lead"];

/// Client for the Facebook Graph API marketing endpoints.
pub struct FacebookClient {
    http: Client,
    access_token: Option<String>,
    base_url: Url,
}

impl FacebookClient {
    /// Creates a client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ConnectorError> {
        Self::build(
            config.facebook_access_token.as_deref(),
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

    /// Fetches and normalizes campaign insights for an ad account.
    ///
    /// Never fails: missing credentials, provider errors, and empty result
    /// sets all produce the fallback dataset.
    pub async fn get_campaign_data(
        &self,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport> {
        let Some(token) = self.access_token.clone() else {
            tracing::debug!(
                platform = "facebook_marketing",
                ad_account_id,
                "no access token configured, serving fallback dataset"
            );
            return Fetched::fallback(fallback::facebook_campaigns());
        };

        match self.fetch_insights(&token, ad_account_id, range).await {
            Ok(report) => {
                tracing::debug!(
                    platform = "facebook_marketing",
                    ad_account_id,
                    campaigns = report.campaigns.len(),
                    "campaign insights fetched"
                );
                Fetched::live(report)
            }
            Err(e) => {
                tracing::warn!(
                    platform = "facebook_marketing",
                    ad_account_id,
                    error = %e,
                    "campaign insights fetch failed, serving fallback dataset"
                );
                Fetched::fallback(fallback::facebook_campaigns())
            }
        }
    }

    /// Fetches page-level insight metrics for a Facebook page.
    pub async fn get_page_insights(&self, page_id: &str) -> Fetched<FacebookPageInsights> {
        let Some(token) = self.access_token.clone() else {
            tracing::debug!(
                platform = "facebook_marketing",
                page_id,
                "no access token configured, serving page insights fallback"
            );
            return Fetched::fallback(fallback::facebook_page_insights());
        };

        match self.fetch_page_insights(&token, page_id).await {
            Ok(insights) => Fetched::live(insights),
            Err(e) => {
                tracing::warn!(
                    platform = "facebook_marketing",
                    page_id,
                    error = %e,
                    "page insights fetch failed, serving fallback"
                );
                Fetched::fallback(fallback::facebook_page_insights())
            }
        }
    }

    async fn fetch_insights(
        &self,
        token: &str,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Result<PlatformCampaignReport, ConnectorError> {
        let url = join_url(&self.base_url, &format!("act_{ad_account_id}/insights"))?;
        let time_range = serde_json::json!({
            "since": range.start_date,
            "until": range.end_date,
        })
        .to_string();

        let response = self
            .http
            .get(url)
            .query(&[
                (
                    "fields",
                    "campaign_name,impressions,clicks,spend,reach,frequency,actions",
                ),
                ("level", "campaign"),
                ("time_range", time_range.as_str()),
                ("access_token", token),
            ])
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let insights: InsightsResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("insights(account={ad_account_id})"),
                source: e,
            })?;

        if insights.data.is_empty() {
            return Err(ConnectorError::Api(
                "insights returned no rows".to_string(),
            ));
        }
        Ok(normalize_campaigns(insights.data))
    }

    async fn fetch_page_insights(
        &self,
        token: &str,
        page_id: &str,
    ) -> Result<FacebookPageInsights, ConnectorError> {
        let url = join_url(&self.base_url, &format!("{page_id}/insights"))?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("metric", "page_impressions,page_engaged_users,page_fans"),
                ("access_token", token),
            ])
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let page: PageInsightsResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("pageInsights(page={page_id})"),
                source: e,
            })?;

        if page.data.is_empty() {
            return Err(ConnectorError::Api(
                "page insights returned no rows".to_string(),
            ));
        }
        Ok(normalize_page_insights(&page.data))
    }
}

#[derive(Debug, Deserialize)]
struct InsightsResponse {
    #[serde(default)]
    data: Vec<CampaignInsight>,
}

#[derive(Debug, Deserialize)]
struct CampaignInsight {
    #[serde(default)]
    campaign_name: String,
    #[serde(default)]
    impressions: String,
    #[serde(default)]
    clicks: String,
    #[serde(default)]
    spend: String,
    #[serde(default)]
    reach: Option<String>,
    #[serde(default)]
    frequency: Option<String>,
    #[serde(default)]
    actions: Vec<ActionEntry>,
}

#[derive(Debug, Deserialize)]
struct ActionEntry {
    #[serde(default)]
    action_type: String,
    #[serde(default)]
    value: String,
}

/// Accumulates insight rows into campaigns keyed by `campaign_name`, then
/// derives per-campaign ratios and the summary row from the raw counters.
fn normalize_campaigns(rows: Vec<CampaignInsight>) -> PlatformCampaignReport {
    let mut by_name: BTreeMap<String, CampaignMetrics> = BTreeMap::new();

    for row in rows {
        let campaign = by_name
            .entry(row.campaign_name.clone())
            .or_insert_with(|| CampaignMetrics::from_raw(row.campaign_name.clone(), 0, 0, 0.0));
        campaign.impressions += parse::u64_field(&row.impressions);
        campaign.clicks += parse::u64_field(&row.clicks);
        campaign.spend += parse::f64_field(&row.spend);
        if let Some(reach) = &row.reach {
            let total = campaign.reach.unwrap_or(0) + parse::u64_field(reach);
            campaign.reach = Some(total);
        }
        if let Some(frequency) = &row.frequency {
            campaign.frequency = Some(parse::f64_field(frequency));
        }
        campaign.conversions += row
            .actions
            .iter()
            .filter(|a| CONVERSION_ACTION_TYPES.contains(&a.action_type.as_str()))
            .map(|a| parse::f64_field(&a.value))
            .sum::<f64>();
    }

    let mut campaigns: Vec<CampaignMetrics> = by_name.into_values().collect();
    for campaign in &mut campaigns {
        campaign.derive_ratios();
    }
    PlatformCampaignReport::from_campaigns(campaigns)
}

#[derive(Debug, Deserialize)]
struct PageInsightsResponse {
    #[serde(default)]
    data: Vec<PageMetric>,
}

#[derive(Debug, Deserialize)]
struct PageMetric {
    #[serde(default)]
    name: String,
    #[serde(default)]
    values: Vec<PageMetricValue>,
}

#[derive(Debug, Deserialize)]
struct PageMetricValue {
    #[serde(default)]
    value: serde_json::Value,
}

/// Period metrics (`page_impressions`, `page_engaged_users`) sum their value
/// series; `page_fans` is a lifetime total, so the last value wins.
fn normalize_page_insights(metrics: &[PageMetric]) -> FacebookPageInsights {
    let mut insights = FacebookPageInsights {
        page_impressions: 0,
        page_engaged_users: 0,
        page_fans: 0,
    };
    for metric in metrics {
        match metric.name.as_str() {
            "page_impressions" => {
                insights.page_impressions +=
                    metric.values.iter().map(|v| parse::u64_value(&v.value)).sum::<u64>();
            }
            "page_engaged_users" => {
                insights.page_engaged_users +=
                    metric.values.iter().map(|v| parse::u64_value(&v.value)).sum::<u64>();
            }
            "page_fans" => {
                if let Some(last) = metric.values.last() {
                    insights.page_fans = parse::u64_value(&last.value);
                }
            }
            _ => {}
        }
    }
    insights
}
