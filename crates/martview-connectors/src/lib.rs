//! Platform adapters for the four marketing read APIs.
//!
//! Each adapter wraps `reqwest` with provider-specific auth, fetches a
//! time-windowed report, and normalizes the wire response into the common
//! shapes from `martview-core`. The public fetch methods never fail: when
//! credentials are missing, the provider call errors, or the result set is
//! empty, the adapter logs and substitutes its static fallback dataset,
//! tagged with [`martview_core::FetchOutcome::Fallback`].

pub mod fallback;

mod error;
mod facebook;
mod google_ads;
mod google_analytics;
mod linkedin;
mod parse;
mod util;

pub use error::ConnectorError;
pub use facebook::FacebookClient;
pub use google_ads::GoogleAdsClient;
pub use google_analytics::GoogleAnalyticsClient;
pub use linkedin::LinkedinClient;
