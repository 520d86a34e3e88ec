//! Cross-platform summary derivation: totals, ROI, insights,
//! recommendations, and the ranked channel list.

use martview_core::{
    AnalyticsMetrics, ChannelRanking, ChannelType, FacebookReport, GoogleAdsReport, LinkedinReport,
    Performance, PlatformSummary, Priority, Recommendation, ReportSummary,
};

const LOW_TRAFFIC_THRESHOLD: u64 = 1000;
const LOW_CONVERSIONS_THRESHOLD: f64 = 100.0;
const HIGH_BOUNCE_RATE_PCT: f64 = 50.0;
const LOW_SESSION_DURATION_SECS: f64 = 60.0;
const STRONG_FACEBOOK_CTR_PCT: f64 = 10.0;
const FACEBOOK_CHANNEL_CTR_PCT: f64 = 5.0;
const TOP_CHANNEL_LIMIT: usize = 5;

/// Derives the cross-platform summary from whichever sections are present.
///
/// Traffic and revenue come from Analytics alone; spend and conversions sum
/// across every present platform. Analytics conversions and ad-platform
/// conversions land in the same counter, so cross-channel double counting
/// is possible; the report consumers accept that.
pub(crate) fn derive_summary(
    analytics: Option<&AnalyticsMetrics>,
    facebook: Option<&FacebookReport>,
    linkedin: Option<&LinkedinReport>,
    google_ads: Option<&GoogleAdsReport>,
) -> ReportSummary {
    let mut summary = ReportSummary::default();

    if let Some(metrics) = analytics {
        summary.total_traffic = metrics.total_users;
        summary.total_conversions += metrics.conversions;
        summary.total_revenue += metrics.revenue;
    }

    let platform_summaries: Vec<&PlatformSummary> = [
        facebook.map(|f| &f.report.summary),
        linkedin.map(|l| &l.report.summary),
        google_ads.map(|g| &g.report.summary),
    ]
    .into_iter()
    .flatten()
    .collect();

    for platform in &platform_summaries {
        summary.total_spend += platform.total_spend;
        summary.total_conversions += platform.total_conversions;
    }

    if summary.total_spend > 0.0 && summary.total_revenue > 0.0 {
        summary.overall_roi =
            (summary.total_revenue - summary.total_spend) / summary.total_spend * 100.0;
    }

    summary.key_insights = derive_insights(
        analytics,
        facebook.map(|f| &f.report.summary),
        google_ads.map(|g| &g.report.summary),
    );
    summary.recommendations = derive_recommendations(&summary);
    summary.top_performing_channels =
        rank_channels(analytics, facebook.map(|f| &f.report.summary));

    summary
}

/// Each rule is evaluated independently; any subset of strings may be
/// produced, including none.
fn derive_insights(
    analytics: Option<&AnalyticsMetrics>,
    facebook: Option<&PlatformSummary>,
    google_ads: Option<&PlatformSummary>,
) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(metrics) = analytics {
        if metrics.bounce_rate > HIGH_BOUNCE_RATE_PCT {
            insights.push(format!(
                "Bounce rate of {:.1}% is above {HIGH_BOUNCE_RATE_PCT:.0}%; landing pages may not match visitor intent",
                metrics.bounce_rate
            ));
        }
        if metrics.avg_session_duration < LOW_SESSION_DURATION_SECS {
            insights.push(format!(
                "Average session duration of {:.0}s is under a minute, indicating low on-site engagement",
                metrics.avg_session_duration
            ));
        }
    }

    if let Some(fb) = facebook {
        if fb.overall_ctr > STRONG_FACEBOOK_CTR_PCT {
            insights.push(format!(
                "Facebook campaigns are performing strongly with a {:.2}% click-through rate",
                fb.overall_ctr
            ));
        }
    }

    if let Some(ads) = google_ads {
        if let Some(roi) = ads.overall_roi {
            if roi > 0.0 {
                insights.push(format!(
                    "Google Ads is converting at ${roi:.2} per conversion"
                ));
            }
        }
    }

    insights
}

fn derive_recommendations(summary: &ReportSummary) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if summary.total_traffic < LOW_TRAFFIC_THRESHOLD {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: "SEO & Content".to_string(),
            title: "Increase Organic Traffic".to_string(),
            description: "Total traffic is below 1,000 users for the period. Invest in content \
                          production and on-page SEO to grow organic discovery."
                .to_string(),
            expected_impact: "20-30% traffic growth within 3 months".to_string(),
        });
    }

    if summary.total_conversions < LOW_CONVERSIONS_THRESHOLD {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: "Conversion Optimization".to_string(),
            title: "Improve Conversion Rate".to_string(),
            description: "Fewer than 100 conversions were recorded. Audit landing pages, forms, \
                          and calls to action for friction."
                .to_string(),
            expected_impact: "10-15% lift in conversion rate".to_string(),
        });
    }

    if summary.overall_roi < 0.0 {
        recommendations.push(Recommendation {
            priority: Priority::High,
            category: "Paid Media".to_string(),
            title: "Optimize Ad Spend".to_string(),
            description: "Ad spend currently exceeds attributed revenue. Reallocate budget toward \
                          the campaigns with the lowest cost per conversion."
                .to_string(),
            expected_impact: "Return to positive ROI within 2 months".to_string(),
        });
    }

    recommendations
}

/// One entry per Analytics traffic source plus a Facebook entry when its
/// CTR clears the channel threshold, sorted descending by the raw metric.
/// User counts and CTR percentages share one axis here; the ordering is
/// kept exactly as the report consumers expect it.
#[allow(clippy::cast_precision_loss)]
fn rank_channels(
    analytics: Option<&AnalyticsMetrics>,
    facebook: Option<&PlatformSummary>,
) -> Vec<ChannelRanking> {
    let mut channels = Vec::new();

    if let Some(metrics) = analytics {
        for (name, source) in &metrics.traffic_sources {
            channels.push(ChannelRanking {
                channel: name.clone(),
                channel_type: ChannelType::Traffic,
                metric: source.users as f64,
                performance: Performance::Good,
            });
        }
    }

    if let Some(fb) = facebook {
        if fb.overall_ctr > FACEBOOK_CHANNEL_CTR_PCT {
            channels.push(ChannelRanking {
                channel: "Facebook".to_string(),
                channel_type: ChannelType::SocialMedia,
                metric: fb.overall_ctr,
                performance: Performance::Excellent,
            });
        }
    }

    channels.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    channels.truncate(TOP_CHANNEL_LIMIT);
    channels
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use martview_core::{CampaignMetrics, PlatformCampaignReport, TrafficSource};

    fn analytics(users: u64, conversions: f64, revenue: f64) -> AnalyticsMetrics {
        AnalyticsMetrics {
            total_users: users,
            sessions: users + 500,
            page_views: users * 3,
            bounce_rate: 40.0,
            avg_session_duration: 120.0,
            conversions,
            revenue,
            traffic_sources: BTreeMap::new(),
            daily_data: Vec::new(),
        }
    }

    fn facebook_report(impressions: u64, clicks: u64, spend: f64) -> FacebookReport {
        FacebookReport {
            report: PlatformCampaignReport::from_campaigns(vec![CampaignMetrics::from_raw(
                "Test", impressions, clicks, spend,
            )]),
            page_insights: None,
        }
    }

    fn sources(entries: &[(&str, u64)]) -> BTreeMap<String, TrafficSource> {
        entries
            .iter()
            .map(|(name, users)| {
                (
                    (*name).to_string(),
                    TrafficSource {
                        users: *users,
                        sessions: *users,
                        page_views: *users * 2,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn empty_report_yields_zeroed_summary_with_shortfall_recommendations() {
        let summary = derive_summary(None, None, None, None);
        assert_eq!(summary.total_traffic, 0);
        assert!((summary.total_spend - 0.0).abs() < f64::EPSILON);
        assert!((summary.overall_roi - 0.0).abs() < f64::EPSILON);
        assert!(summary.key_insights.is_empty());
        assert!(summary.top_performing_channels.is_empty());
        // Zero traffic and zero conversions both trip their thresholds.
        let titles: Vec<&str> = summary
            .recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert!(titles.contains(&"Increase Organic Traffic"));
        assert!(titles.contains(&"Improve Conversion Rate"));
        assert!(!titles.contains(&"Optimize Ad Spend"));
    }

    #[test]
    fn roi_stays_zero_without_revenue() {
        let fb = facebook_report(10_000, 500, 2000.0);
        let summary = derive_summary(None, Some(&fb), None, None);
        assert!((summary.total_spend - 2000.0).abs() < 1e-9);
        // Spend with no revenue: the guard keeps ROI at 0 rather than -100%.
        assert!((summary.overall_roi - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn roi_computed_when_spend_and_revenue_positive() {
        let metrics = analytics(5000, 200.0, 3000.0);
        let fb = facebook_report(10_000, 500, 2000.0);
        let summary = derive_summary(Some(&metrics), Some(&fb), None, None);
        assert!((summary.overall_roi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn conversions_sum_across_analytics_and_ad_platforms() {
        let metrics = analytics(5000, 200.0, 3000.0);
        let mut fb = facebook_report(10_000, 500, 2000.0);
        fb.report.campaigns[0].conversions = 30.0;
        fb.report = PlatformCampaignReport::from_campaigns(fb.report.campaigns.clone());
        let summary = derive_summary(Some(&metrics), Some(&fb), None, None);
        assert!((summary.total_conversions - 230.0).abs() < 1e-9);
    }

    #[test]
    fn high_bounce_and_short_sessions_trigger_insights() {
        let mut metrics = analytics(5000, 200.0, 0.0);
        metrics.bounce_rate = 61.5;
        metrics.avg_session_duration = 45.0;
        let insights = derive_insights(Some(&metrics), None, None);
        assert_eq!(insights.len(), 2);
        assert!(insights[0].contains("Bounce rate of 61.5%"));
        assert!(insights[1].contains("under a minute"));
    }

    #[test]
    fn facebook_ctr_insight_requires_over_ten_percent() {
        let strong = facebook_report(10_000, 1100, 500.0);
        let insights = derive_insights(None, Some(&strong.report.summary), None);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("11.00%"));

        let moderate = facebook_report(10_000, 900, 500.0);
        assert!(derive_insights(None, Some(&moderate.report.summary), None).is_empty());
    }

    #[test]
    fn ads_cost_per_conversion_insight_requires_positive_value() {
        let mut report = PlatformCampaignReport::from_campaigns(vec![
            CampaignMetrics::from_raw("A", 1000, 100, 500.0),
        ]);
        report.summary.overall_roi = Some(25.0);
        let insights = derive_insights(None, None, Some(&report.summary));
        assert_eq!(insights.len(), 1);
        assert!(insights[0].contains("$25.00"));

        report.summary.overall_roi = Some(0.0);
        assert!(derive_insights(None, None, Some(&report.summary)).is_empty());
    }

    #[test]
    fn channels_rank_descending_and_cap_at_five() {
        let mut metrics = analytics(20_000, 500.0, 0.0);
        metrics.traffic_sources = sources(&[
            ("google/organic", 5200),
            ("(direct)/(none)", 2100),
            ("facebook.com/referral", 1600),
            ("bing/organic", 900),
            ("newsletter/email", 700),
            ("twitter.com/social", 300),
        ]);
        let fb = facebook_report(214_000, 21_200, 11_200.0);

        let channels = rank_channels(Some(&metrics), Some(&fb.report.summary));
        assert_eq!(channels.len(), TOP_CHANNEL_LIMIT);
        for pair in channels.windows(2) {
            assert!(pair[0].metric >= pair[1].metric);
        }
        assert_eq!(channels[0].channel, "google/organic");
        // Facebook's CTR of ~9.9 sits on the same axis as raw user counts,
        // so even the 300-user source outranks it and it misses the cut.
        assert!(channels.iter().all(|c| c.channel != "Facebook"));
    }

    #[test]
    fn facebook_entry_ranks_by_ctr_against_user_counts() {
        let mut metrics = analytics(5200, 500.0, 0.0);
        metrics.traffic_sources = sources(&[("google/organic", 5200)]);
        let fb = facebook_report(214_000, 21_200, 11_200.0);

        let channels = rank_channels(Some(&metrics), Some(&fb.report.summary));
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].channel, "google/organic");
        let facebook_entry = &channels[1];
        assert_eq!(facebook_entry.channel, "Facebook");
        assert_eq!(facebook_entry.channel_type, ChannelType::SocialMedia);
        assert_eq!(facebook_entry.performance, Performance::Excellent);
        assert!((facebook_entry.metric - fb.report.summary.overall_ctr).abs() < 1e-9);
    }

    #[test]
    fn facebook_channel_needs_ctr_over_five_percent() {
        let fb = facebook_report(10_000, 400, 500.0);
        assert!(rank_channels(None, Some(&fb.report.summary)).is_empty());
    }
}
