//! Signal generators
//!
//! Produce synthetic input records when real data is unavailable, plus demo
//! trend series and activity maps. The free functions draw from the thread-local
//! RNG; [`SignalGenerator`] wraps a seedable RNG for reproducible output.

use crate::types::{
    AppUsageByCategory, RawHealthData, RawUsageData, SleepQuality, TaskCounts, TaskData,
    TrendPeriod, TrendPoint,
};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fixed Mon..Sat scores of the demo weekly series
const WEEKLY_SCORES: [(f64, f64); 6] = [
    (72.0, 60.0),
    (75.0, 62.0),
    (78.0, 65.0),
    (76.0, 63.0),
    (80.0, 68.0),
    (82.0, 70.0),
];

/// Random-walk series start and bounds
const WALK_START: (f64, f64) = (78.0, 65.0);
const WALK_MIN: f64 = 50.0;
const WALK_MAX: f64 = 100.0;

/// One day of synthetic history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub date: NaiveDate,
    pub mental_score: u8,
    pub physical_score: u8,
    pub steps: u32,
    pub sleep_hours: f64,
}

impl From<&DailyMetrics> for TrendPoint {
    fn from(day: &DailyMetrics) -> Self {
        TrendPoint::new(
            day.date.format("%Y-%m-%d").to_string(),
            day.mental_score as f64,
            day.physical_score as f64,
        )
    }
}

/// Seedable generator for synthetic records
pub struct SignalGenerator {
    rng: StdRng,
}

impl SignalGenerator {
    /// Create a generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn health(&mut self) -> RawHealthData {
        health_with(&mut self.rng)
    }

    pub fn usage(&mut self) -> RawUsageData {
        usage_with(&mut self.rng)
    }

    pub fn tasks(&mut self) -> TaskData {
        tasks_with(&mut self.rng)
    }

    /// Demo score series for a period.
    ///
    /// Weekly is a fixed Mon..Sun sequence ending in the current scores;
    /// monthly and yearly are bounded random walks.
    pub fn trend_series(
        &mut self,
        period: TrendPeriod,
        current_mental: u8,
        current_physical: u8,
    ) -> Vec<TrendPoint> {
        match period {
            TrendPeriod::Weekly => {
                let mut points: Vec<TrendPoint> = WEEKLY_SCORES
                    .iter()
                    .zip(WEEKDAYS)
                    .map(|(&(mental, physical), label)| TrendPoint::new(label, mental, physical))
                    .collect();
                points.push(TrendPoint::new(
                    WEEKDAYS[6],
                    current_mental as f64,
                    current_physical as f64,
                ));
                points
            }
            TrendPeriod::Monthly => {
                let labels: Vec<String> = (1..=30).map(|day| format!("Day {}", day)).collect();
                random_walk(&mut self.rng, &labels, 2.0)
            }
            TrendPeriod::Yearly => {
                let labels: Vec<String> = MONTHS.iter().map(|m| m.to_string()).collect();
                random_walk(&mut self.rng, &labels, 3.0)
            }
        }
    }

    /// Synthetic daily history ending the day before `today`, oldest first
    pub fn history(&mut self, days: u32, today: NaiveDate) -> Vec<DailyMetrics> {
        (0..days)
            .map(|index| {
                let date = today - Duration::days((days - index) as i64);
                let sleep_hours = (5.0 + self.rng.random::<f64>() * 3.0) * 10.0;

                DailyMetrics {
                    date,
                    mental_score: self.rng.random_range(60..90),
                    physical_score: self.rng.random_range(55..90),
                    steps: self.rng.random_range(4000..10_000),
                    sleep_hours: sleep_hours.round() / 10.0,
                }
            })
            .collect()
    }
}

impl Default for SignalGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Random health record (2k-17k steps, 4-8 hours of sleep, ...)
pub fn generate_dummy_health_data() -> RawHealthData {
    health_with(&mut rand::rng())
}

/// Random usage record (1-6 hours of screen time)
pub fn generate_dummy_usage_data() -> RawUsageData {
    usage_with(&mut rand::rng())
}

/// Random task record (3-10 tasks per category, 20-100% completion)
pub fn generate_dummy_task_data() -> TaskData {
    tasks_with(&mut rand::rng())
}

/// Default activity-completion map (days completed this week)
pub fn mock_weekly_activities() -> BTreeMap<String, u8> {
    [
        ("Morning exercise", 4),
        ("Meditation", 3),
        ("Healthy meals", 5),
        ("Adequate sleep", 6),
        ("Social time", 2),
        ("Focused work", 5),
    ]
    .into_iter()
    .map(|(name, days)| (name.to_string(), days))
    .collect()
}

fn health_with<R: Rng + ?Sized>(rng: &mut R) -> RawHealthData {
    let quality_index = rng.random_range(0..SleepQuality::ALL.len());

    RawHealthData {
        steps: rng.random_range(2000..17_000),
        active_minutes: rng.random_range(20..140),
        exercise_minutes: rng.random_range(10..100),
        heart_rate_average: rng.random_range(60..90u32) as f64,
        heart_rate_variability: rng.random_range(40..80u32) as f64,
        sleep_hours: rng.random_range(4.0..8.0),
        sleep_quality: SleepQuality::ALL[quality_index],
        calories_burned: rng.random_range(1500..3000),
    }
}

fn usage_with<R: Rng + ?Sized>(rng: &mut R) -> RawUsageData {
    let total: u32 = rng.random_range(60..360);
    let mut share = |base: f64, spread: f64| -> u32 {
        (total as f64 * (rng.random::<f64>() * spread + base)).floor() as u32
    };

    let app_usage_by_category = AppUsageByCategory {
        social: share(0.1, 0.5),
        work: share(0.1, 0.3),
        gaming: share(0.0, 0.3),
        health: share(0.05, 0.2),
        entertainment: share(0.0, 0.3),
        other: 0,
    };

    RawUsageData {
        screen_time_minutes: total,
        phone_pickups: rng.random_range(30..180),
        app_usage_by_category,
        screen_flicker_count: rng.random_range(0..50),
        night_screen_time: rng.random_range(0..120),
        focus_sessions_completed: rng.random_range(0..6),
    }
}

fn tasks_with<R: Rng + ?Sized>(rng: &mut R) -> TaskData {
    let counts = |rng: &mut R| {
        let total: u32 = rng.random_range(3..11);
        let rate = rng.random::<f64>() * 0.8 + 0.2;
        TaskCounts::new(total, (total as f64 * rate).floor() as u32)
    };

    TaskData {
        mental_tasks: counts(&mut *rng),
        physical_tasks: counts(&mut *rng),
    }
}

fn random_walk<R: Rng + ?Sized>(rng: &mut R, labels: &[String], step: f64) -> Vec<TrendPoint> {
    let (mut mental, mut physical) = WALK_START;

    labels
        .iter()
        .map(|label| {
            mental = (mental + rng.random_range(-step..step)).clamp(WALK_MIN, WALK_MAX);
            physical = (physical + rng.random_range(-step..step)).clamp(WALK_MIN, WALK_MAX);
            TrendPoint::new(label.clone(), mental.round(), physical.round())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let mut a = SignalGenerator::seeded(42);
        let mut b = SignalGenerator::seeded(42);
        assert_eq!(a.health(), b.health());
        assert_eq!(a.usage(), b.usage());
        assert_eq!(a.tasks(), b.tasks());
    }

    #[test]
    fn test_generated_ranges() {
        let mut generator = SignalGenerator::seeded(7);
        for _ in 0..200 {
            let health = generator.health();
            assert!((2000..17_000).contains(&health.steps));
            assert!(health.sleep_hours >= 4.0 && health.sleep_hours < 8.0);
            assert!((60.0..90.0).contains(&health.heart_rate_average));

            let usage = generator.usage();
            assert!((60..360).contains(&usage.screen_time_minutes));
            assert_eq!(usage.app_usage_by_category.other, 0);

            let tasks = generator.tasks();
            for counts in [tasks.mental_tasks, tasks.physical_tasks] {
                assert!((3..11).contains(&counts.total));
                assert!(counts.completed <= counts.total);
            }
            assert!(tasks.has_tasks());
        }
    }

    #[test]
    fn test_weekly_series_ends_with_current_scores() {
        let mut generator = SignalGenerator::seeded(1);
        let series = generator.trend_series(TrendPeriod::Weekly, 81, 66);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0], TrendPoint::new("Mon", 72.0, 60.0));
        assert_eq!(series[6], TrendPoint::new("Sun", 81.0, 66.0));
    }

    #[test]
    fn test_walk_series_stay_in_bounds() {
        let mut generator = SignalGenerator::seeded(3);

        let monthly = generator.trend_series(TrendPeriod::Monthly, 0, 0);
        assert_eq!(monthly.len(), 30);
        assert_eq!(monthly[0].label, "Day 1");

        let yearly = generator.trend_series(TrendPeriod::Yearly, 0, 0);
        assert_eq!(yearly.len(), 12);
        assert_eq!(yearly[11].label, "Dec");

        for point in monthly.iter().chain(yearly.iter()) {
            assert!((WALK_MIN..=WALK_MAX).contains(&point.mental));
            assert!((WALK_MIN..=WALK_MAX).contains(&point.physical));
        }
    }

    #[test]
    fn test_history_is_chronological() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let history = SignalGenerator::seeded(9).history(14, today);

        assert_eq!(history.len(), 14);
        assert_eq!(history[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(history[13].date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        for day in &history {
            assert!((60..90).contains(&day.mental_score));
            assert!((5.0..=8.0).contains(&day.sleep_hours));
        }

        let point = TrendPoint::from(&history[0]);
        assert_eq!(point.label, "2024-03-01");
    }

    #[test]
    fn test_mock_weekly_activities() {
        let activities = mock_weekly_activities();
        assert_eq!(activities.len(), 6);
        assert_eq!(activities["Adequate sleep"], 6);
        assert!(activities.values().all(|&days| days <= 7));
    }
}
