//! Cross-platform report aggregation.
//!
//! [`ReportBuilder`] orchestrates the four platform sources in a fixed
//! order, skips any platform whose account id is absent from the client
//! configuration, and derives the cross-platform summary. Sources are
//! injected through the traits in [`sources`], so the builder can be
//! exercised with in-memory doubles as easily as with the live clients.

mod builder;
mod sources;
mod summary;

pub use builder::{LiveReportBuilder, ReportBuilder};
pub use sources::{AdsSource, AnalyticsSource, FacebookSource, LinkedinSource};
