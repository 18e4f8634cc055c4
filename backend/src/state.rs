//! Application state shared by all handlers
//!
//! Everything here is built once at startup and cloned per request; each
//! field is either a pool handle or behind `Arc`.

use crate::auth::JwtService;
use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::services::{MessageSelector, RewardEngine, TaskService};
use crate::store::{MessageStore, PgStore, RewardStore, TaskStore};
use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    /// JWT service with keys derived once from the secret
    pub jwt: JwtService,
    pub clock: Arc<dyn Clock>,
    pub rewards: Arc<RewardEngine>,
    pub messages: Arc<MessageSelector>,
    pub tasks: Arc<TaskService>,
}

impl AppState {
    /// Production wiring: PostgreSQL-backed stores and the wall clock
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let store = Arc::new(PgStore::new(db.clone()));
        Self::from_parts(
            db,
            config,
            Arc::new(SystemClock),
            store.clone(),
            store.clone(),
            store,
        )
    }

    /// Wire the engines over explicit stores and clock
    pub fn from_parts(
        db: PgPool,
        config: AppConfig,
        clock: Arc<dyn Clock>,
        reward_store: Arc<dyn RewardStore>,
        message_store: Arc<dyn MessageStore>,
        task_store: Arc<dyn TaskStore>,
    ) -> Result<Self> {
        let habits = &config.habits;
        habits.validate()?;
        let timezone = habits.timezone()?;
        let jwt = JwtService::from_config(&config.jwt);

        let rewards = Arc::new(RewardEngine::new(reward_store, clock.clone(), timezone));
        let messages = Arc::new(MessageSelector::new(
            message_store,
            clock.clone(),
            timezone,
            habits.message_history_limit,
            habits.jitter_seed,
        ));
        let tasks = Arc::new(TaskService::new(
            task_store,
            rewards.clone(),
            clock.clone(),
            timezone,
            habits.early_bird_cutoff_hour,
        ));

        Ok(Self {
            db,
            config: Arc::new(config),
            jwt,
            clock,
            rewards,
            messages,
            tasks,
        })
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
