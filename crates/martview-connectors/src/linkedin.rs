//! LinkedIn Marketing (API v2) adapter.
//!
//! Campaign analytics come from `/v2/adAnalytics` pivoted by campaign with
//! LinkedIn's structured `dateRange.start/end` day/month/year parameters,
//! which this client derives from the ISO date strings in [`DateRange`].
//! Organization page metrics come from `/v2/organizations/{id}/shareStatistics`.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Url};
use serde::Deserialize;

use martview_core::{
    AppConfig, CampaignMetrics, DateRange, Fetched, LinkedinPageInsights, PlatformCampaignReport,
};

use crate::error::ConnectorError;
use crate::fallback;
use crate::util::{join_url, parse_base_url};
use crate::parse;

const DEFAULT_BASE_URL: &str = "https://api.linkedin.com/";
const DEFAULT_USER_AGENT: &str = "martview/0.1 (client-reporting)";

/// Client for the LinkedIn Marketing API.
pub struct LinkedinClient {
    http: Client,
    access_token: Option<String>,
    base_url: Url,
}

impl LinkedinClient {
    /// Creates a client pointed at the production LinkedIn API.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ConnectorError> {
        Self::build(
            config.linkedin_access_token.as_deref(),
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

    /// Fetches and normalizes campaign analytics for a sponsored account.
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
                platform = "linkedin_marketing",
                ad_account_id,
                "no access token configured, serving fallback dataset"
            );
            return Fetched::fallback(fallback::linkedin_campaigns());
        };

        match self.fetch_analytics(&token, ad_account_id, range).await {
            Ok(report) => {
                tracing::debug!(
                    platform = "linkedin_marketing",
                    ad_account_id,
                    campaigns = report.campaigns.len(),
                    "campaign analytics fetched"
                );
                Fetched::live(report)
            }
            Err(e) => {
                tracing::warn!(
                    platform = "linkedin_marketing",
                    ad_account_id,
                    error = %e,
                    "campaign analytics fetch failed, serving fallback dataset"
                );
                Fetched::fallback(fallback::linkedin_campaigns())
            }
        }
    }

    /// Fetches share statistics for an organization page.
    pub async fn get_page_insights(&self, company_id: &str) -> Fetched<LinkedinPageInsights> {
        let Some(token) = self.access_token.clone() else {
            tracing::debug!(
                platform = "linkedin_marketing",
                company_id,
                "no access token configured, serving page insights fallback"
            );
            return Fetched::fallback(fallback::linkedin_page_insights());
        };

        match self.fetch_share_statistics(&token, company_id).await {
            Ok(insights) => Fetched::live(insights),
            Err(e) => {
                tracing::warn!(
                    platform = "linkedin_marketing",
                    company_id,
                    error = %e,
                    "share statistics fetch failed, serving fallback"
                );
                Fetched::fallback(fallback::linkedin_page_insights())
            }
        }
    }

    async fn fetch_analytics(
        &self,
        token: &str,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Result<PlatformCampaignReport, ConnectorError> {
        let start = split_iso_date(&range.start_date)?;
        let end = split_iso_date(&range.end_date)?;
        let url = join_url(&self.base_url, "v2/adAnalytics")?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .query(&[
                ("q", "analytics"),
                ("pivot", "CAMPAIGN"),
                ("timeGranularity", "ALL"),
                ("dateRange.start.year", &start.0.to_string()),
                ("dateRange.start.month", &start.1.to_string()),
                ("dateRange.start.day", &start.2.to_string()),
                ("dateRange.end.year", &end.0.to_string()),
                ("dateRange.end.month", &end.1.to_string()),
                ("dateRange.end.day", &end.2.to_string()),
                (
                    "accounts",
                    &format!("urn:li:sponsoredAccount:{ad_account_id}"),
                ),
                (
                    "fields",
                    "campaign,impressions,clicks,costInLocalCurrency,externalWebsiteConversions",
                ),
            ])
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let analytics: AnalyticsResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("adAnalytics(account={ad_account_id})"),
                source: e,
            })?;

        if analytics.elements.is_empty() {
            return Err(ConnectorError::Api(
                "ad analytics returned no elements".to_string(),
            ));
        }
        Ok(normalize_campaigns(analytics.elements))
    }

    async fn fetch_share_statistics(
        &self,
        token: &str,
        company_id: &str,
    ) -> Result<LinkedinPageInsights, ConnectorError> {
        let url = join_url(
            &self.base_url,
            &format!("v2/organizations/{company_id}/shareStatistics"),
        )?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .send()
            .await?
            .error_for_status()?;
        let raw = response.text().await?;
        let stats: ShareStatisticsResponse =
            serde_json::from_str(&raw).map_err(|e| ConnectorError::Deserialize {
                context: format!("shareStatistics(organization={company_id})"),
                source: e,
            })?;

        if stats.elements.is_empty() {
            return Err(ConnectorError::Api(
                "share statistics returned no elements".to_string(),
            ));
        }
        Ok(normalize_share_statistics(&stats.elements))
    }
}

/// Splits an ISO `YYYY-MM-DD` string into LinkedIn's (year, month, day).
fn split_iso_date(date: &str) -> Result<(i32, u32, u32), ConnectorError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| ConnectorError::Api(format!("invalid date '{date}': {e}")))?;
    Ok((parsed.year(), parsed.month(), parsed.day()))
}

#[derive(Debug, Deserialize)]
struct AnalyticsResponse {
    #[serde(default)]
    elements: Vec<AnalyticsElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsElement {
    #[serde(default)]
    campaign: String,
    #[serde(default)]
    impressions: u64,
    #[serde(default)]
    clicks: u64,
    /// Reported as a decimal string, e.g. `"3200.50"`.
    #[serde(default)]
    cost_in_local_currency: serde_json::Value,
    #[serde(default)]
    external_website_conversions: f64,
}

/// Accumulates analytics elements into campaigns keyed by the `campaign`
/// field, then derives ratios from the accumulated counters.
fn normalize_campaigns(elements: Vec<AnalyticsElement>) -> PlatformCampaignReport {
    let mut by_campaign: BTreeMap<String, CampaignMetrics> = BTreeMap::new();

    for element in elements {
        let campaign = by_campaign
            .entry(element.campaign.clone())
            .or_insert_with(|| CampaignMetrics::from_raw(element.campaign.clone(), 0, 0, 0.0));
        campaign.impressions += element.impressions;
        campaign.clicks += element.clicks;
        campaign.spend += parse::f64_value(&element.cost_in_local_currency);
        campaign.conversions += element.external_website_conversions;
    }

    let mut campaigns: Vec<CampaignMetrics> = by_campaign.into_values().collect();
    for campaign in &mut campaigns {
        campaign.derive_ratios();
    }
    PlatformCampaignReport::from_campaigns(campaigns)
}

#[derive(Debug, Deserialize)]
struct ShareStatisticsResponse {
    #[serde(default)]
    elements: Vec<ShareStatisticsElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareStatisticsElement {
    #[serde(default)]
    share_count: u64,
    #[serde(default)]
    impression_count: u64,
    #[serde(default)]
    engagement: f64,
    #[serde(default)]
    follower_count: u64,
}

/// Counters sum across elements; `follower_count` is the last element's
/// value (a point-in-time total, not a per-element increment).
fn normalize_share_statistics(elements: &[ShareStatisticsElement]) -> LinkedinPageInsights {
    let mut insights = LinkedinPageInsights {
        share_count: 0,
        impression_count: 0,
        engagement: 0.0,
        follower_count: 0,
    };
    for element in elements {
        insights.share_count += element.share_count;
        insights.impression_count += element.impression_count;
        insights.engagement += element.engagement;
    }
    if let Some(last) = elements.last() {
        insights.follower_count = last.follower_count;
    }
    insights
}
