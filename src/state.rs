//! Application state snapshot
//!
//! The app shell keeps one [`AppState`] and moves it forward with
//! [`AppState::apply`]. Transitions are pure: the previous snapshot is left
//! untouched and a new one is returned.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Most history entries retained (one year of days)
pub const HISTORY_CAPACITY: usize = 365;

/// Upper bound for any dimension score
const MAX_SCORE: u8 = 100;

/// One recorded day of scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub date: NaiveDate,
    pub mental_score: u8,
    pub physical_score: u8,
    pub timestamp: DateTime<Utc>,
}

/// Dimension that receives an achievement reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTarget {
    Mental,
    Physical,
    Both,
}

/// Transitions understood by [`AppState::apply`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AppAction {
    /// Clamped to 0-100
    SetMentalScore(i32),
    /// Clamped to 0-100
    SetPhysicalScore(i32),
    AddHistoryEntry(BalanceEntry),
    IncrementStreak,
    ResetStreak,
    UnlockAchievement(String),
    SetPrivacyMode(bool),
    SetNotifications(bool),
    ToggleBadDayMode,
    ClearAllData,
    ClaimReward { target: RewardTarget, points: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub current_mental_score: u8,
    pub current_physical_score: u8,
    /// Newest first
    pub daily_history: Vec<BalanceEntry>,
    pub current_streak: u32,
    /// Unlocked achievement ids, in unlock order, without duplicates
    pub achievements: Vec<String>,
    pub privacy_mode: bool,
    pub notifications_enabled: bool,
    pub is_bad_day_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            current_mental_score: 78,
            current_physical_score: 65,
            daily_history: Vec::new(),
            current_streak: 3,
            achievements: vec!["first_balance".to_string(), "week_streak_3".to_string()],
            privacy_mode: false,
            notifications_enabled: true,
            is_bad_day_mode: false,
        }
    }
}

impl AppState {
    /// Return the state that follows `action`.
    pub fn apply(&self, action: AppAction) -> AppState {
        let mut next = self.clone();

        match action {
            AppAction::SetMentalScore(score) => next.current_mental_score = clamp_score(score),
            AppAction::SetPhysicalScore(score) => next.current_physical_score = clamp_score(score),
            AppAction::AddHistoryEntry(entry) => {
                next.daily_history.insert(0, entry);
                next.daily_history.truncate(HISTORY_CAPACITY);
            }
            AppAction::IncrementStreak => {
                next.current_streak = next.current_streak.saturating_add(1)
            }
            AppAction::ResetStreak => next.current_streak = 0,
            AppAction::UnlockAchievement(id) => {
                if !next.achievements.contains(&id) {
                    next.achievements.push(id);
                }
            }
            AppAction::SetPrivacyMode(enabled) => next.privacy_mode = enabled,
            AppAction::SetNotifications(enabled) => next.notifications_enabled = enabled,
            AppAction::ToggleBadDayMode => next.is_bad_day_mode = !next.is_bad_day_mode,
            AppAction::ClearAllData => {
                next.current_mental_score = 0;
                next.current_physical_score = 0;
                next.daily_history.clear();
                next.current_streak = 0;
                next.achievements.clear();
            }
            AppAction::ClaimReward { target, points } => {
                if matches!(target, RewardTarget::Mental | RewardTarget::Both) {
                    next.current_mental_score = add_points(next.current_mental_score, points);
                }
                if matches!(target, RewardTarget::Physical | RewardTarget::Both) {
                    next.current_physical_score = add_points(next.current_physical_score, points);
                }
            }
        }

        next
    }

    /// Oldest-first view of the stored history, ready for trend analysis
    pub fn chronological_history(&self) -> impl Iterator<Item = &BalanceEntry> {
        self.daily_history.iter().rev()
    }
}

fn clamp_score(score: i32) -> u8 {
    score.clamp(0, MAX_SCORE as i32) as u8
}

fn add_points(score: u8, points: u8) -> u8 {
    score.saturating_add(points).min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn entry(day: u32) -> BalanceEntry {
        BalanceEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day as i64),
            mental_score: 70,
            physical_score: 60,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::default();
        assert_eq!(state.current_mental_score, 78);
        assert_eq!(state.current_physical_score, 65);
        assert_eq!(state.current_streak, 3);
        assert_eq!(state.achievements, vec!["first_balance", "week_streak_3"]);
        assert!(state.notifications_enabled);
        assert!(!state.privacy_mode);
    }

    #[test]
    fn test_scores_are_clamped() {
        let state = AppState::default()
            .apply(AppAction::SetMentalScore(140))
            .apply(AppAction::SetPhysicalScore(-5));
        assert_eq!(state.current_mental_score, 100);
        assert_eq!(state.current_physical_score, 0);
    }

    #[test]
    fn test_apply_leaves_previous_state_untouched() {
        let before = AppState::default();
        let after = before.apply(AppAction::ResetStreak);
        assert_eq!(before.current_streak, 3);
        assert_eq!(after.current_streak, 0);
    }

    #[test]
    fn test_history_is_newest_first_and_capped() {
        let mut state = AppState::default();
        for day in 0..400 {
            state = state.apply(AppAction::AddHistoryEntry(entry(day)));
        }

        assert_eq!(state.daily_history.len(), HISTORY_CAPACITY);
        assert_eq!(state.daily_history[0], entry(399));
        assert_eq!(state.chronological_history().next(), Some(&entry(35)));
    }

    #[test]
    fn test_achievements_are_deduplicated() {
        let state = AppState::default()
            .apply(AppAction::UnlockAchievement("first_balance".to_string()))
            .apply(AppAction::UnlockAchievement("month_streak".to_string()));
        assert_eq!(
            state.achievements,
            vec!["first_balance", "week_streak_3", "month_streak"]
        );
    }

    #[test]
    fn test_flags_and_streak() {
        let state = AppState::default()
            .apply(AppAction::IncrementStreak)
            .apply(AppAction::SetPrivacyMode(true))
            .apply(AppAction::SetNotifications(false))
            .apply(AppAction::ToggleBadDayMode);
        assert_eq!(state.current_streak, 4);
        assert!(state.privacy_mode);
        assert!(!state.notifications_enabled);
        assert!(state.is_bad_day_mode);

        assert!(!state.apply(AppAction::ToggleBadDayMode).is_bad_day_mode);
    }

    #[test]
    fn test_clear_all_data_keeps_preferences() {
        let state = AppState::default()
            .apply(AppAction::SetPrivacyMode(true))
            .apply(AppAction::AddHistoryEntry(entry(0)))
            .apply(AppAction::ClearAllData);

        assert_eq!(state.current_mental_score, 0);
        assert_eq!(state.current_physical_score, 0);
        assert!(state.daily_history.is_empty());
        assert_eq!(state.current_streak, 0);
        assert!(state.achievements.is_empty());
        assert!(state.privacy_mode);
    }

    #[test]
    fn test_claim_reward_caps_at_100() {
        let state = AppState::default().apply(AppAction::ClaimReward {
            target: RewardTarget::Both,
            points: 30,
        });
        assert_eq!(state.current_mental_score, 100);
        assert_eq!(state.current_physical_score, 95);

        let state = AppState::default().apply(AppAction::ClaimReward {
            target: RewardTarget::Physical,
            points: 5,
        });
        assert_eq!(state.current_mental_score, 78);
        assert_eq!(state.current_physical_score, 70);
    }

    #[test]
    fn test_action_json_shape() {
        let action: AppAction =
            serde_json::from_str(r#"{"type": "set_mental_score", "payload": 55}"#).unwrap();
        assert_eq!(action, AppAction::SetMentalScore(55));

        let action: AppAction = serde_json::from_str(r#"{"type": "clear_all_data"}"#).unwrap();
        assert_eq!(action, AppAction::ClearAllData);
    }
}
