//! Signed bearer tokens.
//!
//! Access tokens are HS256 JSON Web Tokens signed with the configured
//! secret. Expiry is checked against an explicit clock so it can be tested.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{User, UserId};

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The user's email.
    pub sub: String,
    /// The user's id.
    pub id: UserId,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Issues and verifies access tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
    ttl_seconds: i64,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenService {
    /// Creates a token service from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.token_secret.as_bytes().to_vec(),
            ttl_seconds: config.token_ttl_minutes.saturating_mul(60),
        }
    }

    /// Issues a token for `user`, valid from now for the configured lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use expense_engine::auth::TokenService;
    /// use expense_engine::config::AuthConfig;
    /// use expense_engine::models::User;
    ///
    /// let tokens = TokenService::new(&AuthConfig {
    ///     token_secret: "change-me".to_string(),
    ///     token_ttl_minutes: 60,
    /// });
    /// let user = User {
    ///     id: 1,
    ///     email: "testuser@example.com".to_string(),
    ///     name: "Test User".to_string(),
    ///     mobile_number: "1234567890".to_string(),
    /// };
    ///
    /// let token = tokens.issue(&user).unwrap();
    /// let claims = tokens.verify(&token).unwrap();
    /// assert_eq!(claims.id, 1);
    /// assert_eq!(claims.sub, "testuser@example.com");
    /// ```
    pub fn issue(&self, user: &User) -> ServiceResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> ServiceResult<String> {
        let claims = TokenClaims {
            sub: user.email.clone(),
            id: user.id,
            exp: now.timestamp().saturating_add(self.ttl_seconds),
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| ServiceError::Credential {
            message: e.to_string(),
        })
    }

    /// Verifies a token and returns its claims.
    ///
    /// Fails with `Unauthorized` if the token is malformed, carries a bad
    /// signature, or has expired.
    pub fn verify(&self, token: &str) -> ServiceResult<TokenClaims> {
        self.verify_at(token, Utc::now())
    }

    /// Verifies a token as if the current time were `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> ServiceResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against `now` below instead of the system clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = jsonwebtoken::decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => unauthorized("invalid signature"),
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => {
                unauthorized("malformed claims")
            }
            _ => unauthorized("malformed token"),
        })?;

        if data.claims.exp <= now.timestamp() {
            return Err(unauthorized("token expired"));
        }
        Ok(data.claims)
    }
}

fn unauthorized(message: &str) -> ServiceError {
    ServiceError::Unauthorized {
        message: message.to_string(),
    }
}
