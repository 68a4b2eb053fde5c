//! Insight retrieval with rule-based fallback
//!
//! Two explicit stages: the configured source produces
//! `Result<Vec<Insight>, InsightError>`, then any error is mapped to the
//! rule-based insights with a recorded [`FallbackReason`]. Callers always get
//! insights back.

use super::fallback::default_insights;
use super::types::{Insight, InsightOrigin, InsightSource};
use crate::error::FallbackReason;
use crate::types::TrendAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

/// Insights for one request, tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub origin: InsightOrigin,
    /// Set only when `origin` is `RuleBased` because the source failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    pub insights: Vec<Insight>,
}

impl InsightReport {
    fn new(
        origin: InsightOrigin,
        fallback_reason: Option<FallbackReason>,
        insights: Vec<Insight>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            origin,
            fallback_reason,
            insights,
        }
    }

    /// Rule-based report for callers that skip the remote service on purpose
    pub fn rule_based(trend: &TrendAnalysis) -> Self {
        Self::new(InsightOrigin::RuleBased, None, default_insights(trend))
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == InsightOrigin::RuleBased
    }
}

pub struct InsightService<S> {
    source: S,
}

impl<S: InsightSource> InsightService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Ask the source once; on any failure substitute the rule-based insights.
    pub async fn insights_with_fallback(
        &self,
        trend: &TrendAnalysis,
        activities: &BTreeMap<String, u8>,
    ) -> InsightReport {
        match self.source.generate(trend, activities).await {
            Ok(insights) => InsightReport::new(self.source.origin(), None, insights),
            Err(err) => {
                let reason = err.reason();
                warn!(reason = reason.as_str(), error = %err, "using rule-based insights");
                InsightReport::new(
                    InsightOrigin::RuleBased,
                    Some(reason),
                    default_insights(trend),
                )
            }
        }
    }
}
