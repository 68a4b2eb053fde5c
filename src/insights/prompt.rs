//! Prompt construction for the remote insight service

use crate::types::TrendAnalysis;
use std::collections::BTreeMap;

const RESPONSE_SCHEMA: &str = r#"[
  {
    "title": "Insight title",
    "description": "Brief explanation of why this matters",
    "actionItems": ["Specific action 1", "Specific action 2", "Specific action 3"],
    "priority": "high|medium|low",
    "category": "mental|physical|both"
  }
]"#;

const GUIDELINES: &str = "Guidelines:
1. Prioritize the area that needs the most improvement. Think of the past data's trend and answer accordingly to get out of humps.
2. Build on current strengths and momentum
3. Suggest incremental, realistic changes (not drastic overhauls)
4. Make action items specific and measurable
5. Consider the user's current commitment level based on activity completion";

/// Build the coaching prompt for a trend snapshot and the week's activity
/// completion counts (days out of 7).
///
/// Output is deterministic: activities are listed in key order.
pub fn build_insights_prompt(trend: &TrendAnalysis, activities: &BTreeMap<String, u8>) -> String {
    let activity_summary = activities
        .iter()
        .map(|(activity, completed)| format!("- {}: Completed {}/7 days", activity, completed))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a health and wellness coach. Analyze the following health trends and provide 3-4 specific, actionable insights to help the user improve their scores.

Current Status:
- Mental Score: {}/100 ({} change - {})
- Physical Score: {}/100 ({} change - {})
- Analysis Period: {}

Current Weekly Tasks/Activities:
{}

Please provide personalized recommendations in the following JSON format:
{}

{}

Return ONLY valid JSON, no markdown or extra text.",
        trend.current_mental,
        signed_percent(trend.mental_trend),
        trend.mental_status.as_str(),
        trend.current_physical,
        signed_percent(trend.physical_trend),
        trend.physical_status.as_str(),
        trend.period.as_str(),
        activity_summary,
        RESPONSE_SCHEMA,
        GUIDELINES,
    )
}

/// `+3.2%` for gains, `-1.5%` for losses, `0.0%` for no change
fn signed_percent(change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{}{:.1}%", sign, change)
}
