//! Signed bearer tokens carrying a user's public identity

use crate::core::error::{Error, Result};
use crate::storage::record::{Record, ID_FIELD};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role value granting access to admin routes
pub const ADMIN_ROLE: &str = "admin";

/// Public projection of a user record. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User id
    pub id: String,
    /// Login email
    pub email: String,
    /// Role name, `admin` or anything else
    pub role: String,
}

impl UserIdentity {
    /// Project a stored user record. Returns `None` when `id`, `email` or
    /// `role` is missing or not a string.
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            id: record.get_str(ID_FIELD)?.to_string(),
            email: record.get_str("email")?.to_string(),
            role: record.get_str("role")?.to_string(),
        })
    }
}

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: String,
    /// User email
    pub email: String,
    /// User role
    pub role: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    /// Whether the token grants admin access
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// The identity part of the claims
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.id.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

/// Issues and verifies HS256 tokens with a shared secret
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer for `secret` whose tokens live for `ttl`
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Sign a token for `user`, issued now
    pub fn generate_token(&self, user: &UserIdentity) -> Result<String> {
        self.generate_token_at(user, Utc::now().timestamp())
    }

    /// Sign a token for `user` as if issued at `issued_at` (epoch seconds)
    pub fn generate_token_at(&self, user: &UserIdentity, issued_at: i64) -> Result<String> {
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Check signature and expiry. Every failure maps to the same
    /// "Invalid token" error.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejected: {}", e);
                Error::unauthorized("Invalid token")
            })
    }
}
