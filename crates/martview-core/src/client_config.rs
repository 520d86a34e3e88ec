//! Per-client reporting configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Describes one client's report request: who they are and which platform
/// accounts we may query on their behalf.
///
/// Each platform account id is optional; absence means that platform is
/// skipped entirely when building a report. The struct is treated as
/// immutable for the duration of one report build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub client_name: String,
    #[serde(default)]
    pub industry: String,
    /// Human-readable label for the reporting window, e.g. `"March 2026"`.
    #[serde(default)]
    pub reporting_period: String,
    /// Free-text description of the services delivered to this client.
    #[serde(default)]
    pub services: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_analytics_property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_ad_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_page_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_ad_account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_ads_customer_id: Option<String>,
}

impl ClientConfig {
    /// Loads a client configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read or
    /// [`ConfigError::Yaml`] if it does not parse as a `ClientConfig`.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&raw)?;
        Ok(config)
    }
}

/// Inclusive reporting window as ISO `YYYY-MM-DD` date strings.
///
/// No timezone normalization happens anywhere in the core; callers supply
/// dates already aligned to the reporting period. Adapters that need other
/// representations (LinkedIn's structured day/month/year parameters) derive
/// them from these strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

impl DateRange {
    #[must_use]
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}
