//! Factor calculators
//!
//! Each calculator maps one raw record to a 0-100 factor score using a fixed
//! piecewise formula. Calculators are total; the aggregator clamps composites.

use crate::types::{RawHealthData, RawUsageData, SleepQuality, TaskCounts, TaskData};

/// Screen time up to this many minutes per day is rewarded
const OPTIMAL_SCREEN_TIME_MIN: f64 = 180.0;
/// Screen time penalty reaches its floor here
const MAX_SCREEN_TIME_MIN: f64 = 480.0;

const MAX_PICKUPS: f64 = 200.0;

const OPTIMAL_SLEEP_HOURS: f64 = 8.0;
const MIN_SLEEP_HOURS: f64 = 6.0;

const OPTIMAL_ACTIVE_MIN: f64 = 60.0;
const MAX_ACTIVE_MIN: f64 = 180.0;

const OPTIMAL_EXERCISE_MIN: f64 = 45.0;
const MIN_EXERCISE_MIN: f64 = 20.0;

const OPTIMAL_STEPS: f64 = 10_000.0;
const MIN_STEPS: f64 = 5_000.0;
const MAX_STEPS: f64 = 20_000.0;

/// Completion rate at or above which the bonus applies
const TASK_BONUS_THRESHOLD: f64 = 0.8;

// ============================================================================
// Mental factors
// ============================================================================

/// Screen time score
///
/// - `<= 180 min`: `min(100, 180 / minutes * 80)`; zero minutes scores 100
/// - `> 180 min`: `max(10, 80 - excess / 300 * 80)`
pub fn screen_time_score(usage: &RawUsageData) -> f64 {
    let minutes = usage.screen_time_minutes as f64;

    if minutes <= OPTIMAL_SCREEN_TIME_MIN {
        if minutes <= 0.0 {
            return 100.0;
        }
        return (OPTIMAL_SCREEN_TIME_MIN / minutes * 80.0).min(100.0);
    }

    let excess = minutes - OPTIMAL_SCREEN_TIME_MIN;
    let penalty = excess / (MAX_SCREEN_TIME_MIN - OPTIMAL_SCREEN_TIME_MIN) * 80.0;
    (80.0 - penalty).max(10.0)
}

/// Focus score: pickups 40%, flickers 30%, focus sessions 30%
pub fn focus_score(usage: &RawUsageData) -> f64 {
    let pickup_score = (100.0 - (usage.phone_pickups as f64 / MAX_PICKUPS) * 80.0).max(10.0);
    let flicker_score = (100.0 - usage.screen_flicker_count as f64 * 2.0).max(10.0);
    let session_score = (usage.focus_sessions_completed as f64 * 15.0).min(100.0);

    pickup_score * 0.4 + flicker_score * 0.3 + session_score * 0.3
}

/// Flat bonus added to the sleep score for reported quality.
///
/// `Fair` outranks `Good`. The ordering is kept as-is until product revises it.
pub fn sleep_quality_bonus(quality: SleepQuality) -> f64 {
    match quality {
        SleepQuality::Poor => 10.0,
        SleepQuality::Fair => 30.0,
        SleepQuality::Good => 20.0,
        SleepQuality::Excellent => 40.0,
    }
}

/// Sleep score: up to 60 points for duration plus the quality bonus, capped at 100
pub fn sleep_score(health: &RawHealthData) -> f64 {
    let hours = health.sleep_hours.max(0.0);

    let hours_score = if hours >= OPTIMAL_SLEEP_HOURS {
        60.0
    } else if hours >= MIN_SLEEP_HOURS {
        hours / OPTIMAL_SLEEP_HOURS * 60.0
    } else {
        hours / MIN_SLEEP_HOURS * 30.0
    };

    (hours_score + sleep_quality_bonus(health.sleep_quality)).min(100.0)
}

/// App balance score
///
/// Neutral 50 with no categorized time. Otherwise half social restraint
/// (`max(0, 100 - social_ratio * 250)`), half productive share
/// (`(health_ratio + work_ratio) * 100`).
pub fn app_balance_score(usage: &RawUsageData) -> f64 {
    let apps = &usage.app_usage_by_category;
    let total = apps.total();

    if total <= 0.0 {
        return 50.0;
    }

    let social_ratio = apps.social as f64 / total;
    let health_ratio = apps.health as f64 / total;
    let work_ratio = apps.work as f64 / total;

    let social_score = (100.0 - social_ratio * 250.0).max(0.0);
    let productive_score = (health_ratio + work_ratio) * 100.0;

    social_score * 0.5 + productive_score * 0.5
}

/// Task completion score shared by both dimensions
///
/// Neutral 50 with no tasks; otherwise `rate * 80` plus 20 at 80% completion
/// or better, capped at 100.
pub fn task_completion_score(counts: &TaskCounts) -> f64 {
    if counts.total == 0 {
        return 50.0;
    }

    let rate = counts.completed as f64 / counts.total as f64;
    let bonus = if rate >= TASK_BONUS_THRESHOLD { 20.0 } else { 0.0 };

    (rate * 80.0 + bonus).min(100.0)
}

pub fn mental_task_completion_score(tasks: &TaskData) -> f64 {
    task_completion_score(&tasks.mental_tasks)
}

// ============================================================================
// Physical factors
// ============================================================================

/// Activity score from active minutes
pub fn activity_score(health: &RawHealthData) -> f64 {
    let minutes = health.active_minutes as f64;

    if minutes >= OPTIMAL_ACTIVE_MIN {
        return (minutes / MAX_ACTIVE_MIN * 100.0 + 20.0).min(100.0);
    }

    minutes / OPTIMAL_ACTIVE_MIN * 70.0
}

/// Exercise score from structured exercise minutes
pub fn exercise_score(health: &RawHealthData) -> f64 {
    let minutes = health.exercise_minutes as f64;

    if minutes >= OPTIMAL_EXERCISE_MIN {
        return (minutes / OPTIMAL_EXERCISE_MIN * 80.0 + 20.0).min(100.0);
    }

    if minutes >= MIN_EXERCISE_MIN {
        return minutes / OPTIMAL_EXERCISE_MIN * 80.0;
    }

    minutes / MIN_EXERCISE_MIN * 40.0
}

/// Step score from daily step count
pub fn step_score(health: &RawHealthData) -> f64 {
    let steps = health.steps as f64;

    if steps >= OPTIMAL_STEPS {
        return (steps / MAX_STEPS * 100.0 + 20.0).min(100.0);
    }

    if steps >= MIN_STEPS {
        return steps / OPTIMAL_STEPS * 80.0;
    }

    steps / MIN_STEPS * 40.0
}

/// Heart health score: resting-rate component 60%, HRV 40%
pub fn heart_health_score(health: &RawHealthData) -> f64 {
    let bpm = health.heart_rate_average;

    let rhr_score = if bpm <= 70.0 {
        100.0
    } else if bpm <= 85.0 {
        100.0 - (bpm - 70.0) * 2.67
    } else {
        (100.0 - (bpm - 85.0) * 5.0).max(20.0)
    };

    rhr_score * 0.6 + health.heart_rate_variability * 0.4
}

pub fn physical_task_completion_score(tasks: &TaskData) -> f64 {
    task_completion_score(&tasks.physical_tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppUsageByCategory;

    fn usage(screen_time_minutes: u32) -> RawUsageData {
        RawUsageData {
            screen_time_minutes,
            phone_pickups: 0,
            app_usage_by_category: AppUsageByCategory::default(),
            screen_flicker_count: 0,
            night_screen_time: 0,
            focus_sessions_completed: 0,
        }
    }

    fn health() -> RawHealthData {
        RawHealthData {
            steps: 8000,
            active_minutes: 45,
            exercise_minutes: 30,
            heart_rate_average: 65.0,
            heart_rate_variability: 50.0,
            sleep_hours: 7.0,
            sleep_quality: SleepQuality::Good,
            calories_burned: 2100,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_screen_time_boundaries() {
        assert!(approx(screen_time_score(&usage(180)), 80.0));
        assert!(approx(screen_time_score(&usage(0)), 100.0));
        assert!(approx(screen_time_score(&usage(90)), 100.0));
        assert!(approx(screen_time_score(&usage(330)), 40.0));
        assert!(approx(screen_time_score(&usage(480)), 10.0));
        assert!(approx(screen_time_score(&usage(900)), 10.0));
    }

    #[test]
    fn test_focus_score_blend() {
        let mut data = usage(120);
        data.focus_sessions_completed = 7;
        assert!(approx(focus_score(&data), 100.0));

        data.phone_pickups = 100;
        data.screen_flicker_count = 10;
        data.focus_sessions_completed = 2;
        // 0.4 * 60 + 0.3 * 80 + 0.3 * 30
        assert!(approx(focus_score(&data), 57.0));
    }

    #[test]
    fn test_focus_sub_scores_floor_at_ten() {
        let mut data = usage(120);
        data.phone_pickups = 1000;
        data.screen_flicker_count = 200;
        assert!(approx(focus_score(&data), 0.4 * 10.0 + 0.3 * 10.0));
    }

    #[test]
    fn test_sleep_quality_bonus_ordering() {
        let poor = sleep_quality_bonus(SleepQuality::Poor);
        let fair = sleep_quality_bonus(SleepQuality::Fair);
        let good = sleep_quality_bonus(SleepQuality::Good);
        let excellent = sleep_quality_bonus(SleepQuality::Excellent);

        assert_eq!(poor, 10.0);
        assert_eq!(fair, 30.0);
        assert_eq!(good, 20.0);
        assert_eq!(excellent, 40.0);
        assert!(poor < fair);
        assert!(good < fair);
        assert!(fair < excellent);
    }

    #[test]
    fn test_sleep_hours_bands() {
        let mut data = health();
        data.sleep_quality = SleepQuality::Poor;

        data.sleep_hours = 9.0;
        assert!(approx(sleep_score(&data), 70.0));

        data.sleep_hours = 7.0;
        assert!(approx(sleep_score(&data), 7.0 / 8.0 * 60.0 + 10.0));

        data.sleep_hours = 3.0;
        assert!(approx(sleep_score(&data), 25.0));

        data.sleep_hours = 10.0;
        data.sleep_quality = SleepQuality::Excellent;
        assert!(approx(sleep_score(&data), 100.0));
    }

    #[test]
    fn test_app_balance_neutral_without_app_time() {
        assert!(approx(app_balance_score(&usage(200)), 50.0));
    }

    #[test]
    fn test_app_balance_ratios() {
        let mut data = usage(200);
        data.app_usage_by_category.social = 100;
        assert!(approx(app_balance_score(&data), 0.0));

        data.app_usage_by_category.social = 0;
        data.app_usage_by_category.work = 60;
        data.app_usage_by_category.health = 40;
        assert!(approx(app_balance_score(&data), 100.0));

        data.app_usage_by_category.social = 20;
        data.app_usage_by_category.work = 40;
        data.app_usage_by_category.health = 0;
        data.app_usage_by_category.gaming = 40;
        // social ratio 0.2 -> 50, productive 0.4 -> 40
        assert!(approx(app_balance_score(&data), 45.0));
    }

    #[test]
    fn test_app_balance_handles_saturated_counters() {
        let mut data = usage(200);
        data.app_usage_by_category.social = u32::MAX;
        data.app_usage_by_category.work = 1;

        let score = app_balance_score(&data);
        assert!(score.is_finite());
        assert!((0.0..=100.0).contains(&score));
        // social ratio ~1 floors the social half; productive ratio ~0
        assert!(score < 1.0);
    }

    #[test]
    fn test_task_completion_neutral_without_tasks() {
        for completed in [0, 3, 10] {
            assert_eq!(task_completion_score(&TaskCounts::new(0, completed)), 50.0);
        }
    }

    #[test]
    fn test_task_completion_full_and_partial() {
        for total in [1, 4, 12] {
            assert_eq!(task_completion_score(&TaskCounts::new(total, total)), 100.0);
        }
        assert!(approx(task_completion_score(&TaskCounts::new(4, 2)), 40.0));
        assert!(approx(task_completion_score(&TaskCounts::new(5, 4)), 84.0));
    }

    #[test]
    fn test_task_categories_scored_independently() {
        let tasks = TaskData {
            mental_tasks: TaskCounts::new(2, 2),
            physical_tasks: TaskCounts::new(0, 0),
        };
        assert_eq!(mental_task_completion_score(&tasks), 100.0);
        assert_eq!(physical_task_completion_score(&tasks), 50.0);
    }

    #[test]
    fn test_activity_score() {
        let mut data = health();
        data.active_minutes = 30;
        assert!(approx(activity_score(&data), 35.0));
        data.active_minutes = 90;
        assert!(approx(activity_score(&data), 70.0));
        data.active_minutes = 200;
        assert!(approx(activity_score(&data), 100.0));
    }

    #[test]
    fn test_exercise_score() {
        let mut data = health();
        data.exercise_minutes = 10;
        assert!(approx(exercise_score(&data), 20.0));
        data.exercise_minutes = 36;
        assert!(approx(exercise_score(&data), 64.0));
        data.exercise_minutes = 45;
        assert!(approx(exercise_score(&data), 100.0));
    }

    #[test]
    fn test_step_score() {
        let mut data = health();
        data.steps = 2500;
        assert!(approx(step_score(&data), 20.0));
        data.steps = 7500;
        assert!(approx(step_score(&data), 60.0));
        data.steps = 12_000;
        assert!(approx(step_score(&data), 80.0));
        data.steps = 25_000;
        assert!(approx(step_score(&data), 100.0));
    }

    #[test]
    fn test_heart_health_bands() {
        let mut data = health();
        data.heart_rate_average = 60.0;
        data.heart_rate_variability = 50.0;
        assert!(approx(heart_health_score(&data), 80.0));

        data.heart_rate_average = 80.0;
        assert!(approx(heart_health_score(&data), (100.0 - 26.7) * 0.6 + 20.0));

        data.heart_rate_average = 120.0;
        assert!(approx(heart_health_score(&data), 20.0 * 0.6 + 20.0));
    }
}
