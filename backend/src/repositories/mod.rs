//! Database repositories
//!
//! Thin `sqlx` query wrappers returning `anyhow::Result`; services map
//! failures to `ApiError`.

pub mod messages;
pub mod rewards;
pub mod tasks;
pub mod user;

pub use messages::{MessagePreferencesRepository, MessageRepository};
pub use rewards::{DailyProgressRepository, RewardRepository};
pub use tasks::TaskRepository;
pub use user::{OnboardingUpdate, UserRepository};
