//! Access and refresh tokens
//!
//! Keys are derived once from the configured secret and shared behind
//! `Arc`, so cloning the service into every handler is cheap.

use crate::config::JwtConfig;
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Which of the two token flavours a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: TokenKind,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow!("Invalid user ID in token"))
    }
}

/// Issues and checks tokens
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            config.access_token_expiry_secs,
            config.refresh_token_expiry_secs,
        )
    }

    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenKind::Access, self.access_ttl_secs)
    }

    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.issue(user_id, TokenKind::Refresh, self.refresh_ttl_secs)
    }

    fn issue(&self, user_id: Uuid, kind: TokenKind, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
            token_type: kind,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow!("Failed to generate {:?} token: {}", kind, e))
    }

    /// Decode a token and require it to be of `kind`
    pub fn validate(&self, token: &str, kind: TokenKind) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow!("Invalid token: {}", e))?
            .claims;
        if claims.token_type != kind {
            return Err(anyhow!("Expected a {:?} token", kind));
        }
        Ok(claims)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.validate(token, TokenKind::Refresh)
    }

    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 3600, 604800)
    }

    #[test]
    fn test_access_token_round_trip() {
        let jwt = service();
        let user_id = Uuid::new_v4();

        let token = jwt.generate_access_token(user_id).unwrap();
        let claims = jwt.validate_access_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.token_type, TokenKind::Access);
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let jwt = service();
        let user_id = Uuid::new_v4();

        let access = jwt.generate_access_token(user_id).unwrap();
        let refresh = jwt.generate_refresh_token(user_id).unwrap();

        assert!(jwt.validate_refresh_token(&access).is_err());
        assert!(jwt.validate_access_token(&refresh).is_err());
        assert!(jwt.validate_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = JwtService::new("other", 3600, 3600)
            .generate_access_token(Uuid::new_v4())
            .unwrap();
        assert!(service().validate_access_token(&token).is_err());
        assert!(service().validate_access_token("invalid.token.here").is_err());
    }
}
