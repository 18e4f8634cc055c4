//! Morning task suggestions and statistics

use crate::models::TaskStats;
use chrono::{Duration, NaiveDate};

/// Suggested tasks offered when the user has not picked one today
pub const DEFAULT_TASKS: [&str; 10] = [
    "Make your bed",
    "Do some stretches",
    "Drink a glass of water",
    "Write down 3 things you're grateful for",
    "Take 5 deep breaths",
    "Open the curtains and let in natural light",
    "Do 10 jumping jacks",
    "Read one page of a book",
    "Listen to your favorite song",
    "Plan your top 3 priorities for today",
];

/// Compute task counters from `(local creation day, completed)` pairs
///
/// `tasks` must be ordered newest first. The streak counts completed tasks
/// on consecutive days ending today and stops at the first day that is
/// missing or not completed.
pub fn calculate_task_stats(tasks: &[(NaiveDate, bool)], today: NaiveDate) -> TaskStats {
    let total = tasks.len() as u32;
    let completed = tasks.iter().filter(|(_, done)| *done).count() as u32;

    let mut streak = 0u32;
    for (day, done) in tasks {
        let expected = today - Duration::days(streak as i64);
        if *day == expected && *done {
            streak += 1;
        } else {
            break;
        }
    }

    TaskStats {
        total,
        completed,
        streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, n).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(calculate_task_stats(&[], day(10)), TaskStats::default());
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let tasks = [(day(10), true), (day(9), true), (day(8), true), (day(6), true)];
        let stats = calculate_task_stats(&tasks, day(10));
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 4);
        assert_eq!(stats.streak, 3);
    }

    #[test]
    fn test_open_task_today_breaks_streak() {
        let tasks = [(day(10), false), (day(9), true), (day(8), true)];
        let stats = calculate_task_stats(&tasks, day(10));
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.streak, 0);
    }

    #[test]
    fn test_no_task_today_means_no_streak() {
        let tasks = [(day(9), true), (day(8), true)];
        assert_eq!(calculate_task_stats(&tasks, day(10)).streak, 0);
    }

    #[test]
    fn test_default_tasks_are_unique() {
        let mut titles = DEFAULT_TASKS.to_vec();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), DEFAULT_TASKS.len());
    }
}
