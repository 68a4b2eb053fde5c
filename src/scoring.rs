//! Score aggregation
//!
//! This module provides the public scoring API. Missing records are replaced by
//! synthetic defaults so every factor calculator receives data, while weights
//! are chosen from what the caller actually supplied.
//!
//! Pipeline stages:
//! 1. Availability - resolve from the caller's optional arguments
//! 2. Substitution - fill absent records (tasks become an empty record)
//! 3. Factors - compute each factor score
//! 4. Weights - blend factors with the selected weight vector
//! 5. Clamp and round composites to 0-100

use crate::availability;
use crate::factors;
use crate::generator::SignalGenerator;
use crate::types::{
    DataAvailability, DimensionScore, MentalFactorBreakdown, PhysicalFactorBreakdown,
    RawHealthData, RawUsageData, ScoreBreakdown, TaskData, WellnessScores,
};
use crate::weights::{mental_weights, physical_weights};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// JSON envelope for one scoring call; every record is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub health: Option<RawHealthData>,
    #[serde(default)]
    pub usage: Option<RawUsageData>,
    #[serde(default)]
    pub tasks: Option<TaskData>,
}

/// Compute the mental score, substituting random defaults for absent records.
pub fn calculate_mental_score(
    health: Option<&RawHealthData>,
    usage: Option<&RawUsageData>,
    tasks: Option<&TaskData>,
) -> DimensionScore<MentalFactorBreakdown> {
    ScoreEngine::new().mental_score(health, usage, tasks)
}

/// Compute the physical score, substituting random defaults for absent records.
pub fn calculate_physical_score(
    health: Option<&RawHealthData>,
    tasks: Option<&TaskData>,
) -> DimensionScore<PhysicalFactorBreakdown> {
    ScoreEngine::new().physical_score(health, tasks)
}

/// Compute mental, physical and overall scores.
///
/// # Example
/// ```ignore
/// let scores = calculate_wellness_scores(Some(&health), Some(&usage), None);
/// assert!(scores.overall <= 100);
/// ```
pub fn calculate_wellness_scores(
    health: Option<&RawHealthData>,
    usage: Option<&RawUsageData>,
    tasks: Option<&TaskData>,
) -> WellnessScores {
    ScoreEngine::new().wellness_scores(health, usage, tasks)
}

/// Scoring front end that owns the generator used for substitutes.
///
/// Use [`ScoreEngine::seeded`] when substitutes must be reproducible.
pub struct ScoreEngine {
    generator: SignalGenerator,
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreEngine {
    /// Create an engine whose substitutes are drawn from OS entropy
    pub fn new() -> Self {
        Self {
            generator: SignalGenerator::from_entropy(),
        }
    }

    /// Create an engine with deterministic substitutes
    pub fn seeded(seed: u64) -> Self {
        Self {
            generator: SignalGenerator::seeded(seed),
        }
    }

    pub fn mental_score(
        &mut self,
        health: Option<&RawHealthData>,
        usage: Option<&RawUsageData>,
        tasks: Option<&TaskData>,
    ) -> DimensionScore<MentalFactorBreakdown> {
        let availability = availability::resolve(health, usage, tasks);

        let health = health.cloned().unwrap_or_else(|| self.generator.health());
        let usage = usage.cloned().unwrap_or_else(|| self.generator.usage());
        let tasks = tasks.copied().unwrap_or_default();

        mental_from_records(&health, &usage, &tasks, &availability)
    }

    pub fn physical_score(
        &mut self,
        health: Option<&RawHealthData>,
        tasks: Option<&TaskData>,
    ) -> DimensionScore<PhysicalFactorBreakdown> {
        let availability = availability::resolve(health, None, tasks);

        let health = health.cloned().unwrap_or_else(|| self.generator.health());
        let tasks = tasks.copied().unwrap_or_default();

        physical_from_records(&health, &tasks, &availability)
    }

    /// Compute both dimensions; overall is the rounded mean of the two.
    ///
    /// An absent health record is substituted once and shared by both dimensions.
    pub fn wellness_scores(
        &mut self,
        health: Option<&RawHealthData>,
        usage: Option<&RawUsageData>,
        tasks: Option<&TaskData>,
    ) -> WellnessScores {
        let availability = availability::resolve(health, usage, tasks);

        let health = health.cloned().unwrap_or_else(|| self.generator.health());
        let usage = usage.cloned().unwrap_or_else(|| self.generator.usage());
        let tasks = tasks.copied().unwrap_or_default();

        let mental = mental_from_records(&health, &usage, &tasks, &availability);
        let physical = physical_from_records(&health, &tasks, &availability);
        let overall = to_score((mental.score as f64 + physical.score as f64) / 2.0);

        WellnessScores {
            mental: mental.score,
            physical: physical.score,
            overall,
            breakdown: ScoreBreakdown {
                mental_factors: mental.breakdown,
                physical_factors: physical.breakdown,
            },
        }
    }

    /// Score a decoded [`ScoreRequest`]
    pub fn score_request(&mut self, request: &ScoreRequest) -> WellnessScores {
        self.wellness_scores(
            request.health.as_ref(),
            request.usage.as_ref(),
            request.tasks.as_ref(),
        )
    }
}

fn mental_from_records(
    health: &RawHealthData,
    usage: &RawUsageData,
    tasks: &TaskData,
    availability: &DataAvailability,
) -> DimensionScore<MentalFactorBreakdown> {
    let weights = mental_weights(availability);

    let screen_time = factors::screen_time_score(usage);
    let focus = factors::focus_score(usage);
    let sleep = factors::sleep_score(health);
    let app_balance = factors::app_balance_score(usage);
    let task_completion = factors::mental_task_completion_score(tasks);

    let composite = sleep * weights.sleep
        + focus * weights.focus
        + screen_time * weights.screen_time
        + app_balance * weights.app_balance
        + task_completion * weights.task_completion;

    debug!(
        has_task_data = availability.has_task_data,
        composite, "computed mental score"
    );

    DimensionScore {
        score: to_score(composite),
        breakdown: MentalFactorBreakdown {
            screen_time_score: to_score(screen_time),
            focus_score: to_score(focus),
            sleep_score: to_score(sleep),
            app_balance_score: to_score(app_balance),
            mental_task_completion_score: to_score(task_completion),
        },
    }
}

fn physical_from_records(
    health: &RawHealthData,
    tasks: &TaskData,
    availability: &DataAvailability,
) -> DimensionScore<PhysicalFactorBreakdown> {
    let weights = physical_weights(availability);

    let activity = factors::activity_score(health);
    let exercise = factors::exercise_score(health);
    let steps = factors::step_score(health);
    let heart_health = factors::heart_health_score(health);
    let task_completion = factors::physical_task_completion_score(tasks);

    let composite = steps * weights.steps
        + exercise * weights.exercise
        + activity * weights.activity
        + heart_health * weights.heart_health
        + task_completion * weights.task_completion;

    debug!(
        has_task_data = availability.has_task_data,
        composite, "computed physical score"
    );

    DimensionScore {
        score: to_score(composite),
        breakdown: PhysicalFactorBreakdown {
            activity_score: to_score(activity),
            exercise_score: to_score(exercise),
            step_score: to_score(steps),
            heart_health_score: to_score(heart_health),
            physical_task_completion_score: to_score(task_completion),
        },
    }
}

/// Clamp to 0-100 and round to the nearest integer
fn to_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
