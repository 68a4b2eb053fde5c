//! Insight record and the generator seam

use crate::error::InsightError;
use crate::types::TrendAnalysis;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    High,
    Medium,
    Low,
}

/// Wellness dimension an insight addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Mental,
    Physical,
    Both,
}

/// One actionable recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: String,
    pub description: String,
    /// Ordered steps the user can take
    pub action_items: Vec<String>,
    pub priority: InsightPriority,
    pub category: InsightCategory,
}

impl Insight {
    pub(crate) fn new(
        title: &str,
        description: &str,
        action_items: [&str; 3],
        priority: InsightPriority,
        category: InsightCategory,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            action_items: action_items.iter().map(|item| item.to_string()).collect(),
            priority,
            category,
        }
    }

    /// Check the parts serde cannot: the title must carry text.
    pub fn validate(&self) -> Result<(), InsightError> {
        if self.title.trim().is_empty() {
            return Err(InsightError::InvalidInsight("title is blank".to_string()));
        }
        Ok(())
    }
}

/// Validate a generated list: non-empty, and every entry valid.
pub fn validate_insights(insights: &[Insight]) -> Result<(), InsightError> {
    if insights.is_empty() {
        return Err(InsightError::EmptyInsights);
    }
    insights.iter().try_for_each(Insight::validate)
}

/// Which strategy produced a set of insights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightOrigin {
    Remote,
    RuleBased,
}

/// A strategy that turns a trend snapshot into insights.
#[async_trait]
pub trait InsightSource: Send + Sync {
    /// Origin recorded on reports built from this source's output
    fn origin(&self) -> InsightOrigin;

    async fn generate(
        &self,
        trend: &TrendAnalysis,
        activities: &BTreeMap<String, u8>,
    ) -> Result<Vec<Insight>, InsightError>;
}
