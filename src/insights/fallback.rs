//! Rule-based insights
//!
//! Deterministic recommendations keyed on the trend classification. Used when
//! the remote service is unavailable, and never fails.

use super::types::{Insight, InsightCategory, InsightOrigin, InsightPriority, InsightSource};
use crate::error::InsightError;
use crate::types::{TrendAnalysis, TrendStatus};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Trend gap (percentage points) under which the dimensions count as aligned
pub const ALIGNED_TREND_GAP: f64 = 3.0;

/// One insight per dimension, plus a combined one when both trends move together.
pub fn default_insights(trend: &TrendAnalysis) -> Vec<Insight> {
    let mut insights = vec![
        mental_insight(trend.mental_status),
        physical_insight(trend.physical_status),
    ];

    if (trend.mental_trend - trend.physical_trend).abs() < ALIGNED_TREND_GAP {
        insights.push(Insight::new(
            "Balanced Wellness Growth",
            "Your mental and physical health are aligned. Continue this holistic approach.",
            [
                "Combine activities: outdoor yoga, hiking with friends",
                "Track both metrics together to maintain balance",
                "Celebrate this integrated improvement",
            ],
            InsightPriority::Medium,
            InsightCategory::Both,
        ));
    }

    insights
}

fn mental_insight(status: TrendStatus) -> Insight {
    match status {
        TrendStatus::Declining => Insight::new(
            "Boost Your Mental Wellbeing",
            "Your mental health is declining. Time to prioritize mental wellness.",
            [
                "Add 10 minutes of daily meditation or breathing exercises",
                "Schedule regular social activities (at least 2x per week)",
                "Try journaling for 5 minutes before bed",
            ],
            InsightPriority::High,
            InsightCategory::Mental,
        ),
        TrendStatus::Stable => Insight::new(
            "Maintain Mental Health Momentum",
            "Your mental score is steady. Let's push it to the next level.",
            [
                "Increase meditation time by 5 minutes",
                "Add a new mindfulness practice (yoga, tai chi, etc)",
                "Schedule one new social activity this week",
            ],
            InsightPriority::Medium,
            InsightCategory::Mental,
        ),
        TrendStatus::Improving => Insight::new(
            "Your Mental Health is Thriving",
            "Great progress! Keep up the momentum with your current routine.",
            [
                "Continue your current meditation practice",
                "Share your wellness journey with a friend",
                "Try a new stress-relief activity you've been curious about",
            ],
            InsightPriority::Low,
            InsightCategory::Mental,
        ),
    }
}

fn physical_insight(status: TrendStatus) -> Insight {
    match status {
        TrendStatus::Declining => Insight::new(
            "Revitalize Your Physical Health",
            "Your physical fitness is declining. Time for action!",
            [
                "Start with 15-20 minute walks, 5 days per week",
                "Add 2-3 days of strength training (bodyweight exercises)",
                "Increase your daily step count by 2,000 steps",
            ],
            InsightPriority::High,
            InsightCategory::Physical,
        ),
        TrendStatus::Stable => Insight::new(
            "Level Up Your Physical Routine",
            "Your physical score is consistent. Time to challenge yourself.",
            [
                "Increase workout intensity or duration by 10%",
                "Try a new physical activity (sports, dancing, hiking)",
                "Add flexibility work (yoga or stretching) 2x per week",
            ],
            InsightPriority::Medium,
            InsightCategory::Physical,
        ),
        TrendStatus::Improving => Insight::new(
            "Excellent Physical Progress",
            "Your fitness is improving! Maintain this trajectory.",
            [
                "Set a new fitness milestone (5K run, strength goal)",
                "Introduce a new sport or activity you enjoy",
                "Help someone else start their fitness journey",
            ],
            InsightPriority::Low,
            InsightCategory::Physical,
        ),
    }
}

/// [`InsightSource`] backed by [`default_insights`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInsights;

#[async_trait]
impl InsightSource for RuleBasedInsights {
    fn origin(&self) -> InsightOrigin {
        InsightOrigin::RuleBased
    }

    async fn generate(
        &self,
        trend: &TrendAnalysis,
        _activities: &BTreeMap<String, u8>,
    ) -> Result<Vec<Insight>, InsightError> {
        Ok(default_insights(trend))
    }
}
