use uuid::Uuid;

use martview_connectors::{
    ConnectorError, FacebookClient, GoogleAdsClient, GoogleAnalyticsClient, LinkedinClient,
};
use martview_core::{
    AdvertisingSection, AppConfig, ClientConfig, ClientInfo, DataSources, DateRange, FacebookReport,
    Fetched, GoogleAdsReport, LinkedinReport, RealtimeSnapshot, ReportDocument, SocialMediaSection,
};

use crate::sources::{AdsSource, AnalyticsSource, FacebookSource, LinkedinSource};
use crate::summary;

/// The builder wired to the live platform clients.
pub type LiveReportBuilder =
    ReportBuilder<GoogleAnalyticsClient, FacebookClient, LinkedinClient, GoogleAdsClient>;

/// Orchestrates the platform sources into one [`ReportDocument`].
///
/// Generation never fails: each platform either produces a section (live or
/// fallback data) or is skipped because the client configuration carries no
/// account id for it. The worst case is a report with every section absent
/// and a zeroed summary.
pub struct ReportBuilder<A, F, L, G> {
    analytics: A,
    facebook: F,
    linkedin: L,
    ads: G,
}

impl LiveReportBuilder {
    /// Builds the live clients from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Http`] if any underlying HTTP client cannot
    /// be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConnectorError> {
        Ok(Self::new(
            GoogleAnalyticsClient::new(config)?,
            FacebookClient::new(config)?,
            LinkedinClient::new(config)?,
            GoogleAdsClient::new(config)?,
        ))
    }
}

impl<A, F, L, G> ReportBuilder<A, F, L, G>
where
    A: AnalyticsSource,
    F: FacebookSource,
    L: LinkedinSource,
    G: AdsSource,
{
    pub fn new(analytics: A, facebook: F, linkedin: L, ads: G) -> Self {
        Self {
            analytics,
            facebook,
            linkedin,
            ads,
        }
    }

    /// Generates a report for one client over one date range.
    ///
    /// Platforms are queried sequentially in a fixed order: Analytics,
    /// Facebook, LinkedIn, Google Ads. Page/company insights and keyword
    /// performance are only fetched when their ids are configured; a missing
    /// sub-id leaves that sub-section empty without affecting the campaign
    /// fetch.
    pub async fn generate(&self, client: &ClientConfig, range: &DateRange) -> ReportDocument {
        let report_id = Uuid::new_v4();
        tracing::info!(
            %report_id,
            client = %client.client_name,
            start = %range.start_date,
            end = %range.end_date,
            "generating report"
        );

        let mut data_sources = DataSources::default();

        let analytics = match &client.google_analytics_property_id {
            Some(property_id) => {
                let fetched = self.analytics.analytics_data(property_id, range).await;
                data_sources.google_analytics = fetched.outcome;
                Some(fetched.data)
            }
            None => {
                tracing::debug!(platform = "google_analytics", "no property id, skipping");
                None
            }
        };

        let facebook = match &client.facebook_ad_account_id {
            Some(ad_account_id) => {
                let fetched = self.facebook.campaign_data(ad_account_id, range).await;
                data_sources.facebook_marketing = fetched.outcome;
                let page_insights = match &client.facebook_page_id {
                    Some(page_id) => Some(self.facebook.page_insights(page_id).await.data),
                    None => None,
                };
                Some(FacebookReport {
                    report: fetched.data,
                    page_insights,
                })
            }
            None => {
                tracing::debug!(platform = "facebook_marketing", "no ad account id, skipping");
                None
            }
        };

        let linkedin = match &client.linkedin_ad_account_id {
            Some(ad_account_id) => {
                let fetched = self.linkedin.campaign_data(ad_account_id, range).await;
                data_sources.linkedin_marketing = fetched.outcome;
                let page_insights = match &client.linkedin_company_id {
                    Some(company_id) => Some(self.linkedin.page_insights(company_id).await.data),
                    None => None,
                };
                Some(LinkedinReport {
                    report: fetched.data,
                    page_insights,
                })
            }
            None => {
                tracing::debug!(platform = "linkedin_marketing", "no ad account id, skipping");
                None
            }
        };

        let advertising = match &client.google_ads_customer_id {
            Some(customer_id) => {
                let fetched = self.ads.campaign_data(customer_id, range).await;
                data_sources.google_ads = fetched.outcome;
                let keywords = self.ads.keyword_performance(customer_id, range).await.data;
                Some(AdvertisingSection {
                    google_ads: GoogleAdsReport {
                        report: fetched.data,
                        keywords,
                    },
                })
            }
            None => {
                tracing::debug!(platform = "google_ads", "no customer id, skipping");
                None
            }
        };

        let summary = summary::derive_summary(
            analytics.as_ref(),
            facebook.as_ref(),
            linkedin.as_ref(),
            advertising.as_ref().map(|a| &a.google_ads),
        );

        let social_media = if facebook.is_some() || linkedin.is_some() {
            Some(SocialMediaSection { facebook, linkedin })
        } else {
            None
        };

        tracing::info!(
            %report_id,
            insights = summary.key_insights.len(),
            recommendations = summary.recommendations.len(),
            "report generated"
        );

        ReportDocument {
            report_id,
            client_info: ClientInfo::from_config(client),
            data_sources,
            analytics,
            social_media,
            advertising,
            summary,
        }
    }

    /// Fetches the realtime snapshot for one Analytics property.
    pub async fn realtime(&self, property_id: &str) -> Fetched<RealtimeSnapshot> {
        self.analytics.realtime_snapshot(property_id).await
    }
}
