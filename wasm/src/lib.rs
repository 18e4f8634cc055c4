//! SparkVibe WASM Module
//!
//! WebAssembly bindings for the reward rules so the app can preview
//! levels and points without a round trip.

use sparkvibe_shared::rewards;
use wasm_bindgen::prelude::*;

/// Level for a points total
#[wasm_bindgen]
pub fn calculate_level(total_points: u32) -> u32 {
    rewards::calculate_level(total_points)
}

/// Percent of the way through the current level, 100 at the top level
#[wasm_bindgen]
pub fn level_progress_percent(total_points: u32) -> f64 {
    rewards::level_progress(total_points).percent
}

/// Points needed for the next level, or 0 at the top level
#[wasm_bindgen]
pub fn next_level_threshold(total_points: u32) -> u32 {
    rewards::level_progress(total_points)
        .next_level_threshold
        .unwrap_or(0)
}

/// Points a completion would earn
///
/// `continues_streak` is whether the last completion was yesterday and
/// `previous_streak` the streak before this completion.
#[wasm_bindgen]
pub fn points_for_completion(continues_streak: bool, previous_streak: u32, early_bird: bool) -> u32 {
    let streak = if continues_streak { previous_streak + 1 } else { 1 };
    rewards::points_for_streak(streak, early_bird).total()
}
