//! Business logic services
//!
//! Services coordinate repositories, stores and the shared rules, and
//! return `ApiError` to the route layer.

pub mod messages;
pub mod profile;
pub mod rewards;
pub mod tasks;
pub mod user;

pub use messages::MessageSelector;
pub use profile::ProfileService;
pub use rewards::RewardEngine;
pub use tasks::TaskService;
pub use user::UserService;
