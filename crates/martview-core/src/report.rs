//! The composed cross-platform report document returned to consumers.
//!
//! The report is a plain JSON-serializable object; the camelCase surface is
//! the contract with the UI/export layer. Platform sections are omitted from
//! the JSON entirely when the platform was skipped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AnalyticsMetrics, ClientConfig, FetchOutcome, KeywordMetrics, PlatformCampaignReport,
};

/// Top-level report aggregate built fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub report_id: Uuid,
    pub client_info: ClientInfo,
    pub data_sources: DataSources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<AnalyticsMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMediaSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertising: Option<AdvertisingSection>,
    pub summary: ReportSummary,
}

/// Echo of the requesting [`ClientConfig`] plus the generation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_name: String,
    pub industry: String,
    pub reporting_period: String,
    pub services: String,
    pub generated_at: DateTime<Utc>,
}

impl ClientInfo {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            client_name: config.client_name.clone(),
            industry: config.industry.clone(),
            reporting_period: config.reporting_period.clone(),
            services: config.services.clone(),
            generated_at: Utc::now(),
        }
    }
}

/// Per-platform fetch outcome map.
///
/// Distinguishes "skipped because no account id" from "attempted and served
/// fallback data" from "live provider data".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSources {
    pub google_analytics: FetchOutcome,
    pub facebook_marketing: FetchOutcome,
    pub linkedin_marketing: FetchOutcome,
    pub google_ads: FetchOutcome,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            google_analytics: FetchOutcome::Skipped,
            facebook_marketing: FetchOutcome::Skipped,
            linkedin_marketing: FetchOutcome::Skipped,
            google_ads: FetchOutcome::Skipped,
        }
    }
}

/// Social platform sections; present when at least one social platform was
/// queried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<FacebookReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<LinkedinReport>,
}

/// Facebook Marketing section: ad campaigns plus optional page insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookReport {
    #[serde(flatten)]
    pub report: PlatformCampaignReport,
    /// Only present when a `facebook_page_id` was configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_insights: Option<FacebookPageInsights>,
}

/// Facebook page-level metrics from `/{page_id}/insights`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPageInsights {
    pub page_impressions: u64,
    pub page_engaged_users: u64,
    pub page_fans: u64,
}

/// LinkedIn Marketing section: ad campaigns plus optional company insights.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinReport {
    #[serde(flatten)]
    pub report: PlatformCampaignReport,
    /// Only present when a `linkedin_company_id` was configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_insights: Option<LinkedinPageInsights>,
}

/// LinkedIn organization share statistics.
///
/// Counters are summed across the returned elements; `follower_count` is the
/// last element's value, not a sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedinPageInsights {
    pub share_count: u64,
    pub impression_count: u64,
    pub engagement: f64,
    pub follower_count: u64,
}

/// Paid search/display section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisingSection {
    pub google_ads: GoogleAdsReport,
}

/// Google Ads section: campaigns, keyword performance, and summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsReport {
    #[serde(flatten)]
    pub report: PlatformCampaignReport,
    pub keywords: Vec<KeywordMetrics>,
}

/// Cross-platform rollup derived after all sections are collected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_traffic: u64,
    /// Analytics conversions and every ad platform's conversions summed into
    /// one counter; cross-channel double counting is accepted by design.
    pub total_conversions: f64,
    pub total_spend: f64,
    pub total_revenue: f64,
    /// `(revenue - spend) / spend * 100`, only when both are positive.
    pub overall_roi: f64,
    pub top_performing_channels: Vec<ChannelRanking>,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl Default for ReportSummary {
    fn default() -> Self {
        Self {
            total_traffic: 0,
            total_conversions: 0.0,
            total_spend: 0.0,
            total_revenue: 0.0,
            overall_roi: 0.0,
            top_performing_channels: Vec::new(),
            key_insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// One entry in the ranked channel list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRanking {
    pub channel: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    /// Users for traffic channels, CTR percentage for social channels.
    /// Heterogeneous units ranked on one axis, kept as-is from the product.
    pub metric: f64,
    pub performance: Performance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelType {
    #[serde(rename = "Traffic")]
    Traffic,
    #[serde(rename = "Social Media")]
    SocialMedia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Good,
    Excellent,
}

/// A structured recommendation produced by the fixed rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub description: String,
    pub expected_impact: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}
