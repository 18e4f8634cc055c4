//! Profile and onboarding

use crate::error::ApiError;
use crate::repositories::{OnboardingUpdate, UserRepository};
use sparkvibe_shared::models::UserProfile;
use sparkvibe_shared::types::OnboardingRequest;
use sparkvibe_shared::validation::{get_field_display_label, parse_wake_time, validate_display_name};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct ProfileService;

impl ProfileService {
    pub async fn get_profile(db: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        UserRepository::get_profile(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(UserProfile::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }

    /// Check and convert the submitted onboarding steps
    fn onboarding_update(req: OnboardingRequest) -> Result<OnboardingUpdate, ApiError> {
        let display_name = match req.display_name {
            Some(name) => {
                let name = name.trim().to_string();
                validate_display_name(&name).map_err(|msg| {
                    ApiError::Validation(format!("{}: {}", get_field_display_label("name"), msg))
                })?;
                Some(name)
            }
            None => None,
        };

        let wake_time = req.wake_time.as_deref().map(parse_wake_time).transpose()?;

        Ok(OnboardingUpdate {
            display_name,
            wake_time,
            notification_preferences: req.notification_preferences,
        })
    }

    /// Save whichever steps were answered and mark onboarding complete
    pub async fn complete_onboarding(
        db: &PgPool,
        user_id: Uuid,
        req: OnboardingRequest,
    ) -> Result<UserProfile, ApiError> {
        let update = Self::onboarding_update(req)?;

        let profile = UserRepository::complete_onboarding(db, user_id, update)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(%user_id, "Onboarding completed");
        Ok(profile.into())
    }

    pub async fn update_wake_time(
        db: &PgPool,
        user_id: Uuid,
        wake_time: &str,
    ) -> Result<UserProfile, ApiError> {
        let wake_time = parse_wake_time(wake_time)?;

        UserRepository::update_wake_time(db, user_id, wake_time)
            .await
            .map_err(ApiError::Internal)?
            .map(UserProfile::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
