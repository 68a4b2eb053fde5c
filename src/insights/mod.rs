//! Insight generation
//!
//! Two interchangeable strategies behind [`InsightSource`]:
//! - [`RemoteInsightClient`] asks a text-generation service for a JSON array
//!   of insights
//! - [`RuleBasedInsights`] picks fixed recommendations from the trend
//!   classification
//!
//! [`InsightService`] composes them: remote first, rule-based on any failure.

pub mod fallback;
pub mod prompt;
pub mod remote;
pub mod service;
pub mod types;

pub use fallback::{default_insights, RuleBasedInsights};
pub use prompt::build_insights_prompt;
pub use remote::{parse_insights, RemoteInsightClient};
pub use service::{InsightReport, InsightService};
pub use types::{
    validate_insights, Insight, InsightCategory, InsightOrigin, InsightPriority, InsightSource,
};

use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::types::TrendAnalysis;
use std::collections::BTreeMap;

/// One-shot remote generation with a client built from `config`.
///
/// Errors are returned as-is; use [`InsightService`] for automatic fallback.
pub async fn generate_insights(
    trend: &TrendAnalysis,
    activities: &BTreeMap<String, u8>,
    config: &InsightConfig,
) -> Result<Vec<Insight>, InsightError> {
    if !config.has_credential() {
        return Err(InsightError::MissingCredential);
    }
    RemoteInsightClient::new(config.clone())?
        .generate(trend, activities)
        .await
}
