//! Shared domain types and configuration for the Martview reporting core.
//!
//! Everything that crosses a crate boundary lives here: the client
//! configuration that gates which platforms get queried, the normalized
//! campaign/summary metric shapes, the composed report document, and the
//! process-level [`AppConfig`] loaded from environment variables.

mod app_config;
mod client_config;
mod config;
mod error;
mod metrics;
mod report;

pub use app_config::{AppConfig, Environment};
pub use client_config::{ClientConfig, DateRange};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use metrics::{
    cost_per_conversion, ratio_cpc, ratio_cpm, ratio_ctr, AnalyticsMetrics, CampaignMetrics,
    DailyTraffic, Fetched, FetchOutcome, KeywordMetrics, PlatformCampaignReport, PlatformSummary,
    RealtimeSnapshot, TrafficSource,
};
pub use report::{
    AdvertisingSection, ChannelRanking, ChannelType, ClientInfo, DataSources, FacebookPageInsights,
    FacebookReport, GoogleAdsReport, LinkedinPageInsights, LinkedinReport, Performance, Priority,
    Recommendation, ReportDocument, ReportSummary, SocialMediaSection,
};
