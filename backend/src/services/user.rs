//! Account registration, login and token refresh
//!
//! Password hashing and verification run on the blocking pool.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sparkvibe_shared::types::{AccountProfile, AuthTokens, RegisterRequest};
use sparkvibe_shared::validation::{validate_display_name, validate_password};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::ValidateEmail;

pub struct UserService;

impl UserService {
    fn issue_tokens(jwt_service: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let access_token = jwt_service
            .generate_access_token(user_id)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt_service
            .generate_refresh_token(user_id)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }

    pub async fn register(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: RegisterRequest,
    ) -> Result<AuthTokens, ApiError> {
        let email = req.email.trim().to_lowercase();
        if !email.as_str().validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validate_password(&req.password).map_err(ApiError::Validation)?;
        let display_name = req.display_name.as_deref().map(str::trim);
        if let Some(name) = display_name {
            validate_display_name(name).map_err(ApiError::Validation)?;
        }

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &email, &password_hash, display_name)
            .await
            .map_err(ApiError::Internal)?;
        info!(user_id = %user.id, "User registered");

        Self::issue_tokens(jwt_service, user.id)
    }

    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<AuthTokens, ApiError> {
        let email = email.trim().to_lowercase();
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = PasswordService::verify_async(password.to_string(), user.password_hash)
            .await
            .map_err(ApiError::Internal)?;
        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        Self::issue_tokens(jwt_service, user.id)
    }

    /// Exchange a refresh token for a fresh token pair
    pub async fn refresh_token(
        pool: &PgPool,
        jwt_service: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let user_id = jwt_service
            .validate_refresh_token(refresh_token)
            .and_then(|claims| claims.user_id())
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt_service, user_id)
    }

    pub async fn get_account(pool: &PgPool, user_id: Uuid) -> Result<AccountProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AccountProfile {
            id: user.id.to_string(),
            email: user.email,
            created_at: user.created_at,
        })
    }
}
