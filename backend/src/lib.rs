//! SparkVibe Backend Library
//!
//! Morning-habit service: accounts and onboarding, daily morning tasks,
//! the reward engine and the personalized message selector.

pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
