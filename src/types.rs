//! Core types for the Balance engine
//!
//! This module defines the data structures that flow through each stage of the
//! engine: raw input records, the availability descriptor, weight vectors,
//! composite scores with their factor breakdowns, and trend series.
//!
//! JSON field names are camelCase to match the records produced by the app shell.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Subjective sleep quality reported for one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SleepQuality {
    pub const ALL: [SleepQuality; 4] = [
        SleepQuality::Poor,
        SleepQuality::Fair,
        SleepQuality::Good,
        SleepQuality::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Poor => "poor",
            SleepQuality::Fair => "fair",
            SleepQuality::Good => "good",
            SleepQuality::Excellent => "excellent",
        }
    }
}

/// Device health metrics for one period (typically one day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHealthData {
    /// Daily step count
    pub steps: u32,
    /// Minutes of active movement
    pub active_minutes: u32,
    /// Minutes of structured exercise
    pub exercise_minutes: u32,
    /// Average heart rate (bpm)
    pub heart_rate_average: f64,
    /// Heart rate variability score (0-100)
    pub heart_rate_variability: f64,
    /// Hours slept
    pub sleep_hours: f64,
    pub sleep_quality: SleepQuality,
    /// Estimated daily burn
    pub calories_burned: u32,
}

/// Minutes spent per app category. Values need not sum to total screen time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUsageByCategory {
    pub social: u32,
    pub work: u32,
    pub gaming: u32,
    pub health: u32,
    pub entertainment: u32,
    pub other: u32,
}

impl AppUsageByCategory {
    /// Total categorized minutes, summed in f64 so large counters cannot overflow
    pub fn total(&self) -> f64 {
        [
            self.social,
            self.work,
            self.gaming,
            self.health,
            self.entertainment,
            self.other,
        ]
        .iter()
        .map(|&minutes| minutes as f64)
        .sum()
    }
}

/// Screen usage metrics for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUsageData {
    pub screen_time_minutes: u32,
    /// Number of times the phone was unlocked
    pub phone_pickups: u32,
    pub app_usage_by_category: AppUsageByCategory,
    /// Rapid screen on/off cycles
    pub screen_flicker_count: u32,
    /// Screen time between 10pm and 6am (minutes)
    pub night_screen_time: u32,
    pub focus_sessions_completed: u32,
}

/// Task counters for one category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub total: u32,
    /// Callers keep `completed <= total`; the engine only divides
    pub completed: u32,
}

impl TaskCounts {
    pub fn new(total: u32, completed: u32) -> Self {
        Self { total, completed }
    }
}

/// User task-completion records for one period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    pub mental_tasks: TaskCounts,
    pub physical_tasks: TaskCounts,
}

impl TaskData {
    /// True when at least one category has logged tasks
    pub fn has_tasks(&self) -> bool {
        self.mental_tasks.total > 0 || self.physical_tasks.total > 0
    }
}

/// Which input categories were supplied for a computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAvailability {
    pub has_health_data: bool,
    pub has_usage_data: bool,
    pub has_task_data: bool,
}

/// Weight vector for the mental dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalWeights {
    pub sleep: f64,
    pub focus: f64,
    pub screen_time: f64,
    pub app_balance: f64,
    pub task_completion: f64,
}

impl MentalWeights {
    pub fn sum(&self) -> f64 {
        self.sleep + self.focus + self.screen_time + self.app_balance + self.task_completion
    }
}

/// Weight vector for the physical dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalWeights {
    pub steps: f64,
    pub exercise: f64,
    pub activity: f64,
    pub heart_health: f64,
    pub task_completion: f64,
}

impl PhysicalWeights {
    pub fn sum(&self) -> f64 {
        self.steps + self.exercise + self.activity + self.heart_health + self.task_completion
    }
}

/// Rounded mental factor scores (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalFactorBreakdown {
    pub screen_time_score: u8,
    pub focus_score: u8,
    pub sleep_score: u8,
    pub app_balance_score: u8,
    pub mental_task_completion_score: u8,
}

/// Rounded physical factor scores (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalFactorBreakdown {
    pub activity_score: u8,
    pub exercise_score: u8,
    pub step_score: u8,
    pub heart_health_score: u8,
    pub physical_task_completion_score: u8,
}

/// One dimension's composite score with its breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore<B> {
    pub score: u8,
    pub breakdown: B,
}

/// Labeled factor breakdown for both dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub mental_factors: MentalFactorBreakdown,
    pub physical_factors: PhysicalFactorBreakdown,
}

/// Final wellness scores, computed fresh on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessScores {
    pub mental: u8,
    pub physical: u8,
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
}

/// Caller-supplied tag for the span a trend series covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl TrendPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendPeriod::Weekly => "weekly",
            TrendPeriod::Monthly => "monthly",
            TrendPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for TrendPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(TrendPeriod::Weekly),
            "monthly" => Ok(TrendPeriod::Monthly),
            "yearly" => Ok(TrendPeriod::Yearly),
            other => Err(EngineError::InvalidInput(format!(
                "unknown trend period '{}'",
                other
            ))),
        }
    }
}

/// Direction classification for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStatus {
    Improving,
    Declining,
    Stable,
}

impl TrendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendStatus::Improving => "improving",
            TrendStatus::Declining => "declining",
            TrendStatus::Stable => "stable",
        }
    }
}

/// One chronological point of a score series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Period identifier (weekday, day index, month name)
    pub label: String,
    pub mental: f64,
    pub physical: f64,
}

impl TrendPoint {
    pub fn new(label: impl Into<String>, mental: f64, physical: f64) -> Self {
        Self {
            label: label.into(),
            mental,
            physical,
        }
    }
}

/// Result of comparing the recent and earlier windows of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Signed percentage change of the mental average
    pub mental_trend: f64,
    /// Signed percentage change of the physical average
    pub physical_trend: f64,
    pub current_mental: u8,
    pub current_physical: u8,
    pub period: TrendPeriod,
    pub mental_status: TrendStatus,
    pub physical_status: TrendStatus,
}
