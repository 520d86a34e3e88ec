//! Normalized metric shapes shared by all platform adapters.
//!
//! Every derived ratio in the system goes through the free functions here
//! ([`ratio_ctr`], [`ratio_cpc`], [`ratio_cpm`], [`cost_per_conversion`]),
//! so a campaign's ratios, a platform summary's ratios, and the fallback
//! datasets all obey the same identities: ratios are recomputed from
//! accumulated raw counters, never copied from the provider and never
//! averaged across campaigns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a platform's section of the report was produced.
///
/// `Live` means the provider call succeeded and its response was normalized.
/// `Fallback` means the static fallback dataset was substituted, either
/// because credentials were absent or because the provider call failed.
/// `Skipped` means no account id was configured, so no fetch was attempted
/// and the section is absent from the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchOutcome {
    Live,
    Fallback,
    Skipped,
}

impl FetchOutcome {
    /// Whether a fetch was attempted for this platform (live or fallback).
    #[must_use]
    pub fn is_present(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// A platform payload paired with the outcome that produced it.
///
/// Adapters return this instead of a `Result`: the worst case is fallback
/// data with `outcome == Fallback`, shaped identically to a live result, so
/// the aggregator needs no per-platform success/failure branching.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub outcome: FetchOutcome,
}

impl<T> Fetched<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            outcome: FetchOutcome::Live,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            outcome: FetchOutcome::Fallback,
        }
    }
}

/// Click-through rate as a percentage. 0 when there are no impressions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio_ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        0.0
    } else {
        clicks as f64 / impressions as f64 * 100.0
    }
}

/// Cost per click in currency units. 0 when there are no clicks.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio_cpc(spend: f64, clicks: u64) -> f64 {
    if clicks == 0 {
        0.0
    } else {
        spend / clicks as f64
    }
}

/// Cost per thousand impressions. 0 when there are no impressions.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio_cpm(spend: f64, impressions: u64) -> f64 {
    if impressions == 0 {
        0.0
    } else {
        spend / impressions as f64 * 1000.0
    }
}

/// Spend divided by conversions, 0 when there are no conversions.
///
/// The Google Ads section of the report exposes this value under the `roi`
/// field name; that labeling comes from the product's existing report
/// consumers and is kept unchanged.
#[must_use]
pub fn cost_per_conversion(spend: f64, conversions: f64) -> f64 {
    if conversions > 0.0 {
        spend / conversions
    } else {
        0.0
    }
}

/// Normalized per-campaign metrics, identical in shape across platforms.
///
/// `reach`/`frequency` are only populated where the provider reports them
/// (Facebook); `roi` only for Google Ads campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignMetrics {
    pub name: String,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reach: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    pub conversions: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
}

impl CampaignMetrics {
    /// Builds a campaign from raw counters, deriving all ratios.
    #[must_use]
    pub fn from_raw(name: impl Into<String>, impressions: u64, clicks: u64, spend: f64) -> Self {
        let mut campaign = Self {
            name: name.into(),
            impressions,
            clicks,
            spend,
            reach: None,
            frequency: None,
            conversions: 0.0,
            ctr: 0.0,
            cpc: 0.0,
            cpm: 0.0,
            roi: None,
        };
        campaign.derive_ratios();
        campaign
    }

    /// Recomputes `ctr`/`cpc`/`cpm` from the raw counters. Call after any
    /// mutation of `impressions`, `clicks`, or `spend`.
    pub fn derive_ratios(&mut self) {
        self.ctr = ratio_ctr(self.clicks, self.impressions);
        self.cpc = ratio_cpc(self.spend, self.clicks);
        self.cpm = ratio_cpm(self.spend, self.impressions);
    }
}

/// Platform-level totals summed from campaign raw counters.
///
/// Overall ratios are recomputed from the totals, never averaged from
/// per-campaign ratios. `overall_roi` is only set for Google Ads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub total_spend: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reach: Option<u64>,
    pub total_conversions: f64,
    pub overall_ctr: f64,
    pub overall_cpc: f64,
    pub overall_cpm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_roi: Option<f64>,
}

impl PlatformSummary {
    /// Sums raw counters across campaigns and derives overall ratios.
    #[must_use]
    pub fn from_campaigns(campaigns: &[CampaignMetrics]) -> Self {
        let total_impressions: u64 = campaigns.iter().map(|c| c.impressions).sum();
        let total_clicks: u64 = campaigns.iter().map(|c| c.clicks).sum();
        let total_spend: f64 = campaigns.iter().map(|c| c.spend).sum();
        let total_conversions: f64 = campaigns.iter().map(|c| c.conversions).sum();
        let total_reach = if campaigns.iter().any(|c| c.reach.is_some()) {
            Some(campaigns.iter().filter_map(|c| c.reach).sum())
        } else {
            None
        };

        Self {
            total_impressions,
            total_clicks,
            total_spend,
            total_reach,
            total_conversions,
            overall_ctr: ratio_ctr(total_clicks, total_impressions),
            overall_cpc: ratio_cpc(total_spend, total_clicks),
            overall_cpm: ratio_cpm(total_spend, total_impressions),
            overall_roi: None,
        }
    }
}

/// A platform's campaigns plus their summary row, as returned by the
/// campaign-level fetch of every paid platform adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCampaignReport {
    pub campaigns: Vec<CampaignMetrics>,
    pub summary: PlatformSummary,
}

impl PlatformCampaignReport {
    /// Wraps campaigns with a summary derived from their raw counters.
    #[must_use]
    pub fn from_campaigns(campaigns: Vec<CampaignMetrics>) -> Self {
        let summary = PlatformSummary::from_campaigns(&campaigns);
        Self { campaigns, summary }
    }
}

/// Per-keyword performance from Google Ads `keyword_view`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub keyword: String,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: f64,
    pub ctr: f64,
    pub cpc: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<u8>,
}

/// Google Analytics site metrics accumulated across all returned
/// (date x source x medium) rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetrics {
    pub total_users: u64,
    pub sessions: u64,
    pub page_views: u64,
    /// Percentage, averaged over the returned rows.
    pub bounce_rate: f64,
    /// Seconds, averaged over the returned rows.
    pub avg_session_duration: f64,
    pub conversions: f64,
    pub revenue: f64,
    /// Keyed by `"source/medium"`, e.g. `"google/organic"`.
    pub traffic_sources: BTreeMap<String, TrafficSource>,
    /// One entry per returned row in row order. Rows are not deduplicated
    /// by date: a date that appears under several sources appends several
    /// entries.
    pub daily_data: Vec<DailyTraffic>,
}

/// Accumulated traffic for one `"source/medium"` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSource {
    pub users: u64,
    pub sessions: u64,
    pub page_views: u64,
}

/// One row of the daily traffic series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTraffic {
    /// `YYYYMMDD` as returned by the Analytics `date` dimension.
    pub date: String,
    pub users: u64,
    pub sessions: u64,
    pub page_views: u64,
}

/// Snapshot from the Analytics realtime report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeSnapshot {
    pub active_users: u64,
    pub page_views: u64,
}
