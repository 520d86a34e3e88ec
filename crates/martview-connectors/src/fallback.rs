//! Static fallback datasets served when a platform cannot be queried.
//!
//! Each dataset is deterministic and shaped identically to a live result.
//! Campaign-backed fallbacks are constructed from raw counters and run
//! through [`PlatformCampaignReport::from_campaigns`], so the summary-total
//! and ratio identities hold for fallback data exactly as they do for live
//! data.

use std::collections::BTreeMap;

use martview_core::{
    cost_per_conversion, ratio_cpc, ratio_ctr, AnalyticsMetrics, CampaignMetrics, DailyTraffic,
    FacebookPageInsights, KeywordMetrics, LinkedinPageInsights, PlatformCampaignReport,
    RealtimeSnapshot, TrafficSource,
};

fn campaign(
    name: &str,
    impressions: u64,
    clicks: u64,
    spend: f64,
    reach: Option<u64>,
    frequency: Option<f64>,
    conversions: f64,
) -> CampaignMetrics {
    let mut campaign = CampaignMetrics::from_raw(name, impressions, clicks, spend);
    campaign.reach = reach;
    campaign.frequency = frequency;
    campaign.conversions = conversions;
    campaign
}

/// Google Analytics fallback: a mid-size site with organic-heavy traffic.
#[must_use]
pub fn google_analytics() -> AnalyticsMetrics {
    let mut traffic_sources = BTreeMap::new();
    traffic_sources.insert(
        "google/organic".to_string(),
        TrafficSource {
            users: 5200,
            sessions: 6100,
            page_views: 14_800,
        },
    );
    traffic_sources.insert(
        "(direct)/(none)".to_string(),
        TrafficSource {
            users: 2100,
            sessions: 2400,
            page_views: 5100,
        },
    );
    traffic_sources.insert(
        "facebook.com/referral".to_string(),
        TrafficSource {
            users: 1600,
            sessions: 1900,
            page_views: 3700,
        },
    );

    let daily_data = vec![
        daily("20260302", 1180, 1390, 3210),
        daily("20260303", 1320, 1540, 3560),
        daily("20260304", 1290, 1500, 3400),
        daily("20260305", 1350, 1580, 3620),
        daily("20260306", 1310, 1530, 3480),
        daily("20260307", 1230, 1440, 3190),
        daily("20260308", 1220, 1420, 3140),
    ];

    AnalyticsMetrics {
        total_users: 8900,
        sessions: 10_400,
        page_views: 23_600,
        bounce_rate: 52.4,
        avg_session_duration: 74.0,
        conversions: 310.0,
        revenue: 24_600.0,
        traffic_sources,
        daily_data,
    }
}

fn daily(date: &str, users: u64, sessions: u64, page_views: u64) -> DailyTraffic {
    DailyTraffic {
        date: date.to_string(),
        users,
        sessions,
        page_views,
    }
}

/// Realtime snapshot fallback.
#[must_use]
pub fn google_analytics_realtime() -> RealtimeSnapshot {
    RealtimeSnapshot {
        active_users: 42,
        page_views: 128,
    }
}

/// Facebook campaign fallback.
///
/// Totals: 214,000 impressions, 21,200 clicks, 11,200.00 spend, which puts
/// the overall CTR at 21200/214000*100 = 9.9065...%.
#[must_use]
pub fn facebook_campaigns() -> PlatformCampaignReport {
    PlatformCampaignReport::from_campaigns(vec![
        campaign(
            "Spring Sale - Conversions",
            125_000,
            12_400,
            6500.0,
            Some(98_000),
            Some(1.28),
            86.0,
        ),
        campaign(
            "Brand Awareness - Reach",
            89_000,
            8800,
            4700.0,
            Some(71_500),
            Some(1.24),
            41.0,
        ),
    ])
}

/// Facebook page insights fallback.
#[must_use]
pub fn facebook_page_insights() -> FacebookPageInsights {
    FacebookPageInsights {
        page_impressions: 45_200,
        page_engaged_users: 3870,
        page_fans: 12_450,
    }
}

/// LinkedIn campaign fallback. LinkedIn does not report reach or frequency.
#[must_use]
pub fn linkedin_campaigns() -> PlatformCampaignReport {
    PlatformCampaignReport::from_campaigns(vec![
        campaign(
            "Lead Gen - Decision Makers",
            64_000,
            1920,
            4800.0,
            None,
            None,
            58.0,
        ),
        campaign(
            "Thought Leadership Boost",
            41_000,
            1030,
            2250.0,
            None,
            None,
            17.0,
        ),
    ])
}

/// LinkedIn organization share statistics fallback.
#[must_use]
pub fn linkedin_page_insights() -> LinkedinPageInsights {
    LinkedinPageInsights {
        share_count: 184,
        impression_count: 96_500,
        engagement: 4215.0,
        follower_count: 8340,
    }
}

/// Google Ads campaign fallback, with the per-campaign `roi` field holding
/// spend per conversion.
#[must_use]
pub fn google_ads_campaigns() -> PlatformCampaignReport {
    let mut campaigns = vec![
        campaign("Search - Branded", 45_000, 3600, 2880.0, None, None, 96.0),
        campaign(
            "Search - Non-Brand",
            112_000,
            5040,
            6420.0,
            None,
            None,
            123.0,
        ),
        campaign("Display Remarketing", 260_000, 3120, 1980.0, None, None, 38.0),
    ];
    for c in &mut campaigns {
        c.roi = Some(cost_per_conversion(c.spend, c.conversions));
    }
    let mut report = PlatformCampaignReport::from_campaigns(campaigns);
    report.summary.overall_roi = Some(cost_per_conversion(
        report.summary.total_spend,
        report.summary.total_conversions,
    ));
    report
}

/// Google Ads keyword fallback.
#[must_use]
pub fn google_ads_keywords() -> Vec<KeywordMetrics> {
    let keyword = |keyword: &str, impressions, clicks, spend, conversions, quality_score| {
        KeywordMetrics {
            keyword: keyword.to_string(),
            impressions,
            clicks,
            spend,
            conversions,
            ctr: ratio_ctr(clicks, impressions),
            cpc: ratio_cpc(spend, clicks),
            quality_score: Some(quality_score),
        }
    };
    vec![
        keyword("marketing agency", 18_400, 1290, 1410.0, 41.0, 8),
        keyword("social media management", 12_100, 760, 830.0, 22.0, 7),
        keyword("seo services", 9800, 610, 540.0, 18.0, 9),
    ]
}
