//! Message selector
//!
//! Scores the shared catalog against a user's preferences and the local
//! day/time, then remembers the pick so it is not repeated soon.

use crate::clock::Clock;
use crate::error::ApiError;
use crate::store::MessageStore;
use anyhow::Result;
use chrono_tz::Tz;
use metrics::counter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sparkvibe_shared::messages::{push_history, sample_messages, select_best_message, MessageContext};
use sparkvibe_shared::models::{Message, MessagePreferencesUpdate, NewMessage, UserMessagePreferences};
use sparkvibe_shared::validation::{validate_message_text, validate_tags};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct MessageSelector {
    store: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
    timezone: Tz,
    history_limit: usize,
    jitter_seed: Option<u64>,
}

impl MessageSelector {
    pub fn new(
        store: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
        timezone: Tz,
        history_limit: usize,
        jitter_seed: Option<u64>,
    ) -> Self {
        Self {
            store,
            clock,
            timezone,
            history_limit,
            jitter_seed,
        }
    }

    fn jitter_rng(&self) -> StdRng {
        match self.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Today's message for the user; `None` for an empty catalog or on error
    pub async fn get_personalized_message(&self, user_id: Uuid) -> Option<Message> {
        match self.select_for(user_id).await {
            Ok(message) => message,
            Err(e) => {
                error!(%user_id, error = %e, "Failed to select personalized message");
                None
            }
        }
    }

    async fn select_for(&self, user_id: Uuid) -> Result<Option<Message>> {
        let prefs = self
            .store
            .load_preferences(user_id)
            .await?
            .unwrap_or_default();
        let local = self.clock.now().with_timezone(&self.timezone);
        let context = MessageContext::from_local(&local);
        let catalog = self.store.list_messages().await?;

        let chosen = {
            let mut rng = self.jitter_rng();
            select_best_message(&catalog, &prefs, &context, &mut rng).cloned()
        };
        let Some(message) = chosen else {
            return Ok(None);
        };

        let mut history = prefs.last_message_ids;
        push_history(&mut history, message.id, self.history_limit);
        if let Err(e) = self.store.save_history(user_id, &history).await {
            warn!(%user_id, error = %e, "Failed to record message history");
        }

        counter!("sparkvibe_messages_served_total").increment(1);
        Ok(Some(message))
    }

    /// Stored preferences with per-field defaults
    pub async fn get_preferences(&self, user_id: Uuid) -> UserMessagePreferences {
        match self.store.load_preferences(user_id).await {
            Ok(prefs) => prefs.unwrap_or_default(),
            Err(e) => {
                error!(%user_id, error = %e, "Failed to load message preferences");
                UserMessagePreferences::default()
            }
        }
    }

    /// Merge the supplied fields; the shown-message history is untouched
    pub async fn update_preferences(
        &self,
        user_id: Uuid,
        update: MessagePreferencesUpdate,
    ) -> Result<UserMessagePreferences, ApiError> {
        if let Some(ref tags) = update.excluded_tags {
            validate_tags(tags).map_err(ApiError::Validation)?;
        }
        if update.is_empty() {
            return Ok(self.get_preferences(user_id).await);
        }

        self.store
            .merge_preferences(user_id, &update)
            .await
            .map_err(ApiError::Internal)
    }

    pub async fn add_message(&self, message: NewMessage) -> Result<Message, ApiError> {
        validate_message_text(&message.text).map_err(ApiError::Validation)?;
        validate_tags(&message.tags).map_err(ApiError::Validation)?;

        let stored = self
            .store
            .insert_message(&message)
            .await
            .map_err(ApiError::Internal)?;
        info!(message_id = %stored.id, category = %stored.category, "Message added");
        Ok(stored)
    }

    /// Insert the sample catalog if the catalog is empty
    ///
    /// Returns how many messages were inserted.
    pub async fn seed_messages(&self) -> Result<usize, ApiError> {
        let existing = self
            .store
            .count_messages()
            .await
            .map_err(ApiError::Internal)?;
        if existing > 0 {
            info!(existing, "Message catalog already seeded");
            return Ok(0);
        }

        let samples = sample_messages();
        for message in &samples {
            self.store
                .insert_message(message)
                .await
                .map_err(ApiError::Internal)?;
        }
        info!(count = samples.len(), "Seeded message catalog");
        Ok(samples.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn selector(store: Arc<MemoryStore>) -> MessageSelector {
        let at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 0, 0).unwrap();
        MessageSelector::new(store, Arc::new(FixedClock::new(at)), Tz::UTC, 10, Some(7))
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_none() {
        let selector = selector(Arc::new(MemoryStore::new()));
        assert!(selector.get_personalized_message(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_catalog() {
        let store = Arc::new(MemoryStore::new());
        let selector = selector(store.clone());

        assert_eq!(selector.seed_messages().await.unwrap(), sample_messages().len());
        assert_eq!(selector.seed_messages().await.unwrap(), 0);
        assert_eq!(store.count_messages().await.unwrap(), sample_messages().len() as u64);
    }

    #[tokio::test]
    async fn test_add_message_validates_text() {
        let selector = selector(Arc::new(MemoryStore::new()));
        let result = selector
            .add_message(NewMessage {
                text: "   ".to_string(),
                category: Default::default(),
                mood: Default::default(),
                length: Default::default(),
                tags: vec![],
            })
            .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_failure_yields_none() {
        let store = Arc::new(MemoryStore::new());
        let selector = selector(store.clone());
        selector.seed_messages().await.unwrap();
        store.set_unavailable(true);

        assert!(selector.get_personalized_message(Uuid::new_v4()).await.is_none());
        assert_eq!(
            selector.get_preferences(Uuid::new_v4()).await,
            UserMessagePreferences::default()
        );
    }

    #[tokio::test]
    async fn test_seeded_jitter_repeats_across_requests() {
        let store = Arc::new(MemoryStore::new());
        let selector = selector(store);
        selector.seed_messages().await.unwrap();

        let first = selector.get_personalized_message(Uuid::new_v4()).await.unwrap();
        let second = selector.get_personalized_message(Uuid::new_v4()).await.unwrap();
        assert_eq!(first.id, second.id);
    }
}
