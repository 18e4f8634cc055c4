//! Personalized message scoring
//!
//! A greedy additive scorer: preference and context matches add weight, an
//! excluded tag subtracts weight (it never removes the message), and a small
//! random jitter separates near ties.

use crate::models::{
    Message, MessageCategory, MessageLength, MessageMood, NewMessage, UserMessagePreferences,
};
use chrono::{Datelike, Timelike};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const CATEGORY_WEIGHT: f64 = 10.0;
pub const MOOD_WEIGHT: f64 = 8.0;
pub const LENGTH_WEIGHT: f64 = 5.0;
pub const DAY_TAG_WEIGHT: f64 = 6.0;
pub const TIME_TAG_WEIGHT: f64 = 4.0;
pub const EXCLUDED_TAG_PENALTY: f64 = 15.0;

/// Jitter is drawn uniformly from `[0, MAX_JITTER)`
pub const MAX_JITTER: f64 = 3.0;

/// Number of delivered message ids remembered for anti-repetition
pub const MESSAGE_HISTORY_LIMIT: usize = 10;

/// Day names indexed from Sunday, matching message tags
pub const DAYS_OF_WEEK: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Coarse time-of-day bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Early,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => TimeOfDay::Early,
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Early => "early",
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day and time the message is being selected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContext {
    pub day_of_week: &'static str,
    pub time_of_day: TimeOfDay,
}

impl MessageContext {
    /// Context for a local date-time
    pub fn from_local<T: Datelike + Timelike>(local: &T) -> Self {
        let day_index = local.weekday().num_days_from_sunday() as usize;
        Self {
            day_of_week: DAYS_OF_WEEK[day_index],
            time_of_day: TimeOfDay::from_hour(local.hour()),
        }
    }
}

/// Deterministic part of a message's score
pub fn base_score(
    message: &Message,
    prefs: &UserMessagePreferences,
    context: &MessageContext,
) -> f64 {
    let mut score = 0.0;

    if prefs.preferred_categories.contains(&message.category) {
        score += CATEGORY_WEIGHT;
    }
    if message.mood == prefs.preferred_mood {
        score += MOOD_WEIGHT;
    }
    if message.length == prefs.preferred_length {
        score += LENGTH_WEIGHT;
    }
    if has_tag(message, context.day_of_week) {
        score += DAY_TAG_WEIGHT;
    }
    if has_tag(message, context.time_of_day.as_str()) {
        score += TIME_TAG_WEIGHT;
    }
    if message
        .tags
        .iter()
        .any(|tag| prefs.excluded_tags.contains(tag))
    {
        score -= EXCLUDED_TAG_PENALTY;
    }

    score
}

fn has_tag(message: &Message, tag: &str) -> bool {
    message.tags.iter().any(|t| t == tag)
}

/// Pick the highest-scoring message
///
/// Messages in the recent history are skipped unless that would leave
/// nothing, in which case the whole catalog is scored. Returns `None` only
/// for an empty catalog.
pub fn select_best_message<'a, R: Rng + ?Sized>(
    catalog: &'a [Message],
    prefs: &UserMessagePreferences,
    context: &MessageContext,
    rng: &mut R,
) -> Option<&'a Message> {
    let fresh: Vec<&Message> = catalog
        .iter()
        .filter(|m| !prefs.last_message_ids.contains(&m.id))
        .collect();

    let candidates = if fresh.is_empty() {
        catalog.iter().collect()
    } else {
        fresh
    };

    let mut best: Option<(&Message, f64)> = None;
    for message in candidates {
        let score = base_score(message, prefs, context) + rng.gen_range(0.0..MAX_JITTER);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((message, score)),
        }
    }

    best.map(|(message, _)| message)
}

/// Append a delivered id, keeping only the newest `limit` entries
pub fn push_history(history: &mut Vec<Uuid>, id: Uuid, limit: usize) {
    history.push(id);
    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
    }
}

/// Starter catalog inserted by the seeding operation
pub fn sample_messages() -> Vec<NewMessage> {
    fn entry(
        text: &str,
        category: MessageCategory,
        mood: MessageMood,
        length: MessageLength,
        tags: &[&str],
    ) -> NewMessage {
        NewMessage {
            text: text.to_string(),
            category,
            mood,
            length,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    vec![
        entry(
            "Good morning! Today is your day to shine. Every sunrise is a new opportunity to be the best version of yourself.",
            MessageCategory::Motivational,
            MessageMood::Energetic,
            MessageLength::Medium,
            &["morning", "monday", "opportunity"],
        ),
        entry(
            "Rise and conquer! Your potential is limitless. Let's make today amazing.",
            MessageCategory::Motivational,
            MessageMood::Energetic,
            MessageLength::Short,
            &["morning", "energy", "goals"],
        ),
        entry(
            "Take a deep breath. You are capable of amazing things. Trust the process and enjoy the journey.",
            MessageCategory::Mindfulness,
            MessageMood::Calm,
            MessageLength::Medium,
            &["mindfulness", "calm", "journey"],
        ),
        entry(
            "You've got this! Every step forward is progress. Keep moving toward your dreams.",
            MessageCategory::Achievement,
            MessageMood::Focused,
            MessageLength::Short,
            &["progress", "goals", "focused"],
        ),
        entry(
            "Gratitude is the key to happiness. Take a moment to appreciate the beautiful day ahead and all the possibilities it holds.",
            MessageCategory::Mindfulness,
            MessageMood::Grateful,
            MessageLength::Long,
            &["gratitude", "happiness", "possibilities"],
        ),
    ]
}
