//! SparkVibe Shared Library
//!
//! Domain models, reward rules and message scoring shared by the backend
//! and the WASM module.

pub mod errors;
pub mod messages;
pub mod models;
pub mod rewards;
pub mod tasks;
pub mod types;
pub mod validation;

pub use errors::*;
pub use models::*;
pub use types::*;
