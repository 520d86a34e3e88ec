//! Injection seams between the report builder and the platform adapters.
//!
//! One trait per platform, mirroring that platform's primary and secondary
//! fetches. The live clients from `martview-connectors` implement them by
//! delegation; tests implement them with canned data.

use async_trait::async_trait;

use martview_connectors::{FacebookClient, GoogleAdsClient, GoogleAnalyticsClient, LinkedinClient};
use martview_core::{
    AnalyticsMetrics, DateRange, FacebookPageInsights, Fetched, KeywordMetrics,
    LinkedinPageInsights, PlatformCampaignReport, RealtimeSnapshot,
};

/// Google Analytics site metrics and the realtime snapshot.
#[async_trait]
pub trait AnalyticsSource: Send + Sync {
    async fn analytics_data(&self, property_id: &str, range: &DateRange)
        -> Fetched<AnalyticsMetrics>;

    async fn realtime_snapshot(&self, property_id: &str) -> Fetched<RealtimeSnapshot>;
}

/// Facebook ad campaigns and page insights.
#[async_trait]
pub trait FacebookSource: Send + Sync {
    async fn campaign_data(
        &self,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport>;

    async fn page_insights(&self, page_id: &str) -> Fetched<FacebookPageInsights>;
}

/// LinkedIn ad campaigns and organization share statistics.
#[async_trait]
pub trait LinkedinSource: Send + Sync {
    async fn campaign_data(
        &self,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport>;

    async fn page_insights(&self, company_id: &str) -> Fetched<LinkedinPageInsights>;
}

/// Google Ads campaigns and keyword performance.
#[async_trait]
pub trait AdsSource: Send + Sync {
    async fn campaign_data(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport>;

    async fn keyword_performance(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Fetched<Vec<KeywordMetrics>>;
}

#[async_trait]
impl AnalyticsSource for GoogleAnalyticsClient {
    async fn analytics_data(
        &self,
        property_id: &str,
        range: &DateRange,
    ) -> Fetched<AnalyticsMetrics> {
        self.get_analytics_data(property_id, range).await
    }

    async fn realtime_snapshot(&self, property_id: &str) -> Fetched<RealtimeSnapshot> {
        self.get_realtime_snapshot(property_id).await
    }
}

#[async_trait]
impl FacebookSource for FacebookClient {
    async fn campaign_data(
        &self,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport> {
        self.get_campaign_data(ad_account_id, range).await
    }

    async fn page_insights(&self, page_id: &str) -> Fetched<FacebookPageInsights> {
        self.get_page_insights(page_id).await
    }
}

#[async_trait]
impl LinkedinSource for LinkedinClient {
    async fn campaign_data(
        &self,
        ad_account_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport> {
        self.get_campaign_data(ad_account_id, range).await
    }

    async fn page_insights(&self, company_id: &str) -> Fetched<LinkedinPageInsights> {
        self.get_page_insights(company_id).await
    }
}

#[async_trait]
impl AdsSource for GoogleAdsClient {
    async fn campaign_data(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Fetched<PlatformCampaignReport> {
        self.get_campaign_data(customer_id, range).await
    }

    async fn keyword_performance(
        &self,
        customer_id: &str,
        range: &DateRange,
    ) -> Fetched<Vec<KeywordMetrics>> {
        self.get_keyword_performance(customer_id, range).await
    }
}
