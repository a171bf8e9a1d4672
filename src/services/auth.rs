//! Identity verifier
//!
//! Admin-gated mutations (event, sub-event, sponsor, college writes) all go
//! through `require_admin`: the caller hands over the bearer credential it
//! received, the token is decoded and the admin row is loaded. Services take
//! this guard as a constructor dependency instead of parsing headers inline.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::database::repositories::AdminRepository;
use crate::models::admin::Admin;
use crate::utils::errors::{FestBuddyError, Result};

/// JWT claims carried by an admin session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id
    pub sub: i64,
    /// Expiry, seconds since the unix epoch
    pub exp: i64,
}

#[derive(Clone)]
pub struct AuthService {
    admin_repository: AdminRepository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(admin_repository: AdminRepository, config: AuthConfig) -> Self {
        Self {
            admin_repository,
            config,
        }
    }

    /// Issue a session token for an admin
    pub fn issue_token(&self, admin_id: i64) -> Result<String> {
        encode_token(&self.config, admin_id)
    }

    /// Decode a token and return the admin id it was issued for
    pub fn verify_token(&self, token: &str) -> Result<i64> {
        decode_token(&self.config, token)
    }

    /// Verify a bearer credential and load the admin it belongs to.
    /// Accepts the raw token or the full "Bearer <token>" header value.
    pub async fn require_admin(&self, bearer: &str) -> Result<Admin> {
        let token = strip_bearer(bearer)
            .ok_or_else(|| FestBuddyError::Authentication("Token not found".to_string()))?;

        let admin_id = self.verify_token(token)?;

        let admin = match self.admin_repository.find_by_id(admin_id).await? {
            Some(admin) => admin,
            None => {
                warn!(admin_id = admin_id, "Token valid but admin no longer exists");
                return Err(FestBuddyError::Authentication(
                    "Admin account not found".to_string(),
                ));
            }
        };

        debug!(admin_id = admin.id, "Admin identity verified");
        Ok(admin)
    }
}

fn strip_bearer(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Some(token),
        Some(_) => None,
        None => Some(value),
    }
}

pub(crate) fn encode_token(config: &AuthConfig, admin_id: i64) -> Result<String> {
    let expires_at = Utc::now() + Duration::days(config.token_ttl_days);
    let claims = Claims {
        sub: admin_id,
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )?;

    Ok(token)
}

pub(crate) fn decode_token(config: &AuthConfig, token: &str) -> Result<i64> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims.sub)
}
