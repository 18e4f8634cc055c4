//! Points, streak, level and achievement rules
//!
//! Everything here is a pure function of its inputs. Calendar days are
//! supplied by the caller already converted to the user's local timezone.

use crate::models::{Achievement, AchievementId, DailyProgress, UserRewards};
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Points for every completed task
pub const TASK_COMPLETION_POINTS: u32 = 10;

/// Bonus for continuing a streak of at least `STREAK_BONUS_MIN_STREAK` days
pub const STREAK_BONUS_POINTS: u32 = 5;
pub const STREAK_BONUS_MIN_STREAK: u32 = 3;

/// Bonus for completions the caller flags as early
pub const EARLY_BIRD_BONUS_POINTS: u32 = 3;

/// Default early-bird cutoff (local hour, exclusive)
pub const EARLY_BIRD_CUTOFF_HOUR: u32 = 7;

/// One-time bonus on the day the streak becomes exactly seven
pub const PERFECT_WEEK_BONUS_POINTS: u32 = 25;
pub const PERFECT_WEEK_STREAK: u32 = 7;

/// Minimum total points for each level; level = index + 1
pub const LEVEL_THRESHOLDS: [u32; 16] = [
    0, 50, 150, 300, 500, 750, 1050, 1400, 1800, 2250, 2750, 3300, 3900, 4550, 5250, 6000,
];

/// Highest reachable level
pub const MAX_LEVEL: u32 = LEVEL_THRESHOLDS.len() as u32;

/// Level for a points total
pub fn calculate_level(total_points: u32) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| total_points >= threshold)
        .map(|index| index as u32 + 1)
        .unwrap_or(1)
}

/// Position of a points total inside its level band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub level_threshold: u32,
    /// `None` once the top level is reached
    pub next_level_threshold: Option<u32>,
    pub percent: f64,
}

/// Progress through the current level band
pub fn level_progress(total_points: u32) -> LevelProgress {
    let level = calculate_level(total_points);
    let level_threshold = LEVEL_THRESHOLDS[(level - 1) as usize];
    let next_level_threshold = LEVEL_THRESHOLDS.get(level as usize).copied();

    let percent = match next_level_threshold {
        Some(next) => {
            let band = (next - level_threshold) as f64;
            (total_points - level_threshold) as f64 / band * 100.0
        }
        None => 100.0,
    };

    LevelProgress {
        level,
        level_threshold,
        next_level_threshold,
        percent,
    }
}

/// Whether a completion on `today` continues the streak
///
/// True for a first completion or when the previous completion was on the
/// calendar day before `today`. Any other gap, including a second completion
/// on the same day, starts a new streak.
pub fn continues_streak(last_task_day: Option<NaiveDate>, today: NaiveDate) -> bool {
    match last_task_day {
        None => true,
        Some(last) => (today - last).num_days() == 1,
    }
}

/// Whether a local completion time earns the early-bird bonus
pub fn is_early_bird<T: Timelike>(local_time: &T, cutoff_hour: u32) -> bool {
    local_time.hour() < cutoff_hour
}

/// Points awarded for one completion, split by rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub base: u32,
    pub streak_bonus: u32,
    pub early_bird_bonus: u32,
    pub perfect_week_bonus: u32,
}

impl PointsBreakdown {
    pub fn total(&self) -> u32 {
        self.base + self.streak_bonus + self.early_bird_bonus + self.perfect_week_bonus
    }
}

/// Inputs for applying one completion to a reward record
#[derive(Debug, Clone, Copy)]
pub struct CompletionContext {
    /// Caller-supplied completion time, stored as the new last task date
    pub completed_at: DateTime<Utc>,
    /// Local calendar day of the completion being recorded
    pub today: NaiveDate,
    /// Local calendar day of the record's previous completion
    pub last_task_day: Option<NaiveDate>,
    pub is_early_bird: bool,
    /// Processing time used for unlock and update timestamps
    pub now: DateTime<Utc>,
}

/// Everything one completion changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// Full replacement for the stored record
    pub rewards: UserRewards,
    pub points: PointsBreakdown,
    pub unlocked: Vec<Achievement>,
}

impl CompletionOutcome {
    pub fn points_earned(&self) -> u32 {
        self.points.total()
    }

    /// Daily progress entry for the completion day
    pub fn daily_progress(&self, date: NaiveDate) -> DailyProgress {
        DailyProgress {
            date,
            points_earned: self.points.total(),
            tasks_completed: 1,
            streak_bonus: self.points.streak_bonus,
            early_bird_bonus: self.points.early_bird_bonus,
            perfect_week_bonus: self.points.perfect_week_bonus,
            total_points: self.rewards.total_points,
        }
    }
}

/// Points earned by a completion that leaves the streak at `new_streak`
///
/// A reset streak is always 1, so the streak bonus only applies to
/// continued streaks.
pub fn points_for_streak(new_streak: u32, is_early_bird: bool) -> PointsBreakdown {
    PointsBreakdown {
        base: TASK_COMPLETION_POINTS,
        streak_bonus: if new_streak >= STREAK_BONUS_MIN_STREAK {
            STREAK_BONUS_POINTS
        } else {
            0
        },
        early_bird_bonus: if is_early_bird { EARLY_BIRD_BONUS_POINTS } else { 0 },
        perfect_week_bonus: if new_streak == PERFECT_WEEK_STREAK {
            PERFECT_WEEK_BONUS_POINTS
        } else {
            0
        },
    }
}

/// Apply one task completion to a reward record
pub fn apply_task_completion(current: &UserRewards, ctx: &CompletionContext) -> CompletionOutcome {
    let new_streak = if continues_streak(ctx.last_task_day, ctx.today) {
        current.current_streak + 1
    } else {
        1
    };
    let points = points_for_streak(new_streak, ctx.is_early_bird);

    let total_points = current.total_points.saturating_add(points.total());
    let total_tasks = current.total_tasks_completed.saturating_add(1);
    let unlocked = evaluate_achievements(&current.achievements, total_tasks, new_streak, ctx.now);

    let mut achievements = current.achievements.clone();
    achievements.extend(unlocked.iter().cloned());

    let rewards = UserRewards {
        total_points,
        current_level: calculate_level(total_points),
        current_streak: new_streak,
        longest_streak: current.longest_streak.max(new_streak),
        total_tasks_completed: total_tasks,
        achievements,
        last_task_date: Some(ctx.completed_at),
        created_at: current.created_at,
        updated_at: ctx.now,
    };

    CompletionOutcome {
        rewards,
        points,
        unlocked,
    }
}

/// Achievements that become unlocked with these counter values
///
/// Every rule fires only on the exact value, and ids already present in
/// `existing` are skipped.
pub fn evaluate_achievements(
    existing: &[Achievement],
    total_tasks: u32,
    streak: u32,
    unlocked_at: DateTime<Utc>,
) -> Vec<Achievement> {
    let rules = [
        (AchievementId::FirstTask, total_tasks == 1),
        (AchievementId::WeekWarrior, streak == 7),
        (AchievementId::ConsistencyKing, streak == 14),
        (AchievementId::MonthMaster, streak == 30),
    ];

    rules
        .into_iter()
        .filter(|(id, fired)| *fired && !existing.iter().any(|a| a.id == *id))
        .map(|(id, _)| Achievement::unlock(id, unlocked_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, TimeZone};
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(day: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&day.and_hms_opt(8, 0, 0).unwrap())
    }

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    fn complete(rewards: &UserRewards, today: NaiveDate, early: bool) -> CompletionOutcome {
        let ctx = CompletionContext {
            completed_at: at(today),
            today,
            last_task_day: rewards.last_task_date.map(|d| d.date_naive()),
            is_early_bird: early,
            now: at(today),
        };
        apply_task_completion(rewards, &ctx)
    }

    #[rstest]
    #[case(0, 1)]
    #[case(49, 1)]
    #[case(50, 2)]
    #[case(149, 2)]
    #[case(150, 3)]
    #[case(160, 3)]
    #[case(299, 3)]
    #[case(1050, 7)]
    #[case(5999, 15)]
    #[case(6000, 16)]
    #[case(1_000_000, 16)]
    fn test_level_table(#[case] points: u32, #[case] level: u32) {
        assert_eq!(calculate_level(points), level);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_level_is_monotonic(a in 0u32..10_000, b in 0u32..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calculate_level(lo) <= calculate_level(hi));
        }

        #[test]
        fn prop_level_matches_threshold_band(points in 0u32..10_000) {
            let level = calculate_level(points);
            prop_assert!((1..=MAX_LEVEL).contains(&level));
            prop_assert!(points >= LEVEL_THRESHOLDS[(level - 1) as usize]);
            if let Some(&next) = LEVEL_THRESHOLDS.get(level as usize) {
                prop_assert!(points < next);
            }
        }

        #[test]
        fn prop_level_progress_is_a_percentage(points in 0u32..10_000) {
            let progress = level_progress(points);
            prop_assert!(progress.percent >= 0.0 && progress.percent <= 100.0);
        }

        #[test]
        fn prop_longest_streak_never_decreases(gaps in prop::collection::vec(0i64..4, 1..40)) {
            let mut rewards = UserRewards::initial(at(day(0)));
            let mut today = day(0);
            let mut previous_longest = 0;
            for gap in gaps {
                today += Duration::days(gap);
                rewards = complete(&rewards, today, false).rewards;
                prop_assert!(rewards.longest_streak >= previous_longest);
                prop_assert!(rewards.longest_streak >= rewards.current_streak);
                previous_longest = rewards.longest_streak;
            }
        }
    }

    #[test]
    fn test_level_progress_bands() {
        let start = level_progress(0);
        assert_eq!(start.level, 1);
        assert_eq!(start.next_level_threshold, Some(50));
        assert_eq!(start.percent, 0.0);

        let mid = level_progress(225);
        assert_eq!(mid.level, 3);
        assert_eq!(mid.level_threshold, 150);
        assert!((mid.percent - 50.0).abs() < 1e-9);

        let top = level_progress(7000);
        assert_eq!(top.level, MAX_LEVEL);
        assert_eq!(top.next_level_threshold, None);
        assert_eq!(top.percent, 100.0);
    }

    #[test]
    fn test_streak_continuation() {
        assert!(continues_streak(None, day(0)));
        assert!(continues_streak(Some(day(0)), day(1)));
        assert!(!continues_streak(Some(day(0)), day(2)));
        assert!(!continues_streak(Some(day(3)), day(3)));
    }

    #[test]
    fn test_early_bird_cutoff() {
        let six = NaiveTime::from_hms_opt(6, 59, 59).unwrap();
        let seven = NaiveTime::from_hms_opt(7, 0, 0).unwrap();
        assert!(is_early_bird(&six, EARLY_BIRD_CUTOFF_HOUR));
        assert!(!is_early_bird(&seven, EARLY_BIRD_CUTOFF_HOUR));
    }

    #[test]
    fn test_consecutive_days_extend_streak_and_gap_resets() {
        let first = complete(&UserRewards::initial(at(day(0))), day(0), false);
        assert_eq!(first.rewards.current_streak, 1);

        let second = complete(&first.rewards, day(1), false);
        assert_eq!(second.rewards.current_streak, 2);

        let skipped = complete(&first.rewards, day(2), false);
        assert_eq!(skipped.rewards.current_streak, 1);
    }

    #[test]
    fn test_same_day_repeat_resets_streak() {
        let mut rewards = UserRewards::initial(at(day(0)));
        for n in 0..4 {
            rewards = complete(&rewards, day(n), false).rewards;
        }
        assert_eq!(rewards.current_streak, 4);

        let repeat = complete(&rewards, day(3), false);
        assert_eq!(repeat.rewards.current_streak, 1);
        assert_eq!(repeat.rewards.longest_streak, 4);
    }

    #[test]
    fn test_example_streak_bonus_scenario() {
        let mut rewards = UserRewards::initial(at(day(0)));
        rewards.total_points = 145;
        rewards.current_level = calculate_level(145);
        rewards.current_streak = 2;
        rewards.longest_streak = 2;
        rewards.total_tasks_completed = 2;
        rewards.last_task_date = Some(at(day(1)));

        let outcome = complete(&rewards, day(2), false);
        assert_eq!(outcome.points_earned(), 15);
        assert_eq!(outcome.points.streak_bonus, STREAK_BONUS_POINTS);
        assert_eq!(outcome.rewards.total_points, 160);
        assert_eq!(outcome.rewards.current_level, 3);
        assert_eq!(outcome.rewards.current_streak, 3);
    }

    #[test]
    fn test_perfect_week_bonus_only_on_day_seven() {
        let mut rewards = UserRewards::initial(at(day(0)));
        let mut bonuses = Vec::new();
        for n in 0..9 {
            let outcome = complete(&rewards, day(n), false);
            bonuses.push(outcome.points.perfect_week_bonus);
            rewards = outcome.rewards;
        }
        assert_eq!(bonuses[5], 0);
        assert_eq!(bonuses[6], PERFECT_WEEK_BONUS_POINTS);
        assert_eq!(bonuses[7], 0);
    }

    #[test]
    fn test_early_bird_bonus_is_caller_supplied() {
        let rewards = UserRewards::initial(at(day(0)));
        let outcome = complete(&rewards, day(0), true);
        assert_eq!(outcome.points.early_bird_bonus, EARLY_BIRD_BONUS_POINTS);
        assert_eq!(outcome.points_earned(), 13);
    }

    #[test]
    fn test_first_task_unlocks_once() {
        let first = complete(&UserRewards::initial(at(day(0))), day(0), false);
        assert_eq!(first.unlocked.len(), 1);
        assert_eq!(first.unlocked[0].id, AchievementId::FirstTask);

        let second = complete(&first.rewards, day(1), false);
        assert!(second.unlocked.is_empty());
        assert_eq!(
            second
                .rewards
                .achievements
                .iter()
                .filter(|a| a.id == AchievementId::FirstTask)
                .count(),
            1
        );
    }

    #[test]
    fn test_streak_achievements_fire_on_exact_values() {
        let mut rewards = UserRewards::initial(at(day(0)));
        let mut unlocked_on = Vec::new();
        for n in 0..31 {
            let outcome = complete(&rewards, day(n), false);
            for achievement in &outcome.unlocked {
                unlocked_on.push((achievement.id, outcome.rewards.current_streak));
            }
            rewards = outcome.rewards;
        }

        assert_eq!(
            unlocked_on,
            vec![
                (AchievementId::FirstTask, 1),
                (AchievementId::WeekWarrior, 7),
                (AchievementId::ConsistencyKing, 14),
                (AchievementId::MonthMaster, 30),
            ]
        );
        assert!(!rewards.has_achievement(AchievementId::EarlyRiser));
        assert!(!rewards.has_achievement(AchievementId::TaskExplorer));
        assert!(!rewards.has_achievement(AchievementId::PerfectWeek));
    }

    #[test]
    fn test_streak_rule_does_not_refire_after_reset() {
        let existing = vec![Achievement::unlock(AchievementId::WeekWarrior, at(day(0)))];
        let unlocked = evaluate_achievements(&existing, 20, 7, at(day(20)));
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_daily_progress_breakdown() {
        let mut rewards = UserRewards::initial(at(day(0)));
        for n in 0..6 {
            rewards = complete(&rewards, day(n), false).rewards;
        }
        let outcome = complete(&rewards, day(6), true);
        let progress = outcome.daily_progress(day(6));

        assert_eq!(progress.date, day(6));
        assert_eq!(progress.tasks_completed, 1);
        assert_eq!(progress.streak_bonus, STREAK_BONUS_POINTS);
        assert_eq!(progress.early_bird_bonus, EARLY_BIRD_BONUS_POINTS);
        assert_eq!(progress.perfect_week_bonus, PERFECT_WEEK_BONUS_POINTS);
        assert_eq!(progress.points_earned, 10 + 5 + 3 + 25);
        assert_eq!(progress.total_points, outcome.rewards.total_points);
    }
}
