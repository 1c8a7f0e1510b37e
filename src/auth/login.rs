//! Email and password login

use crate::auth::password::{hash_password, verify_password_blocking};
use crate::auth::token::{Claims, TokenIssuer, UserIdentity};
use crate::core::error::{Error, Result};
use crate::storage::{Collection, Store};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Signed bearer token
    pub token: String,
    /// Public projection of the logged in user
    pub user: UserIdentity,
}

/// Checks credentials against the `users` collection and issues tokens
pub struct Authenticator {
    issuer: TokenIssuer,
    /// Hash compared against when the email is unknown, so both failure
    /// paths cost one bcrypt verification.
    decoy_hash: String,
}

impl Authenticator {
    /// Create an authenticator signing with `secret`
    pub fn new(secret: &str, ttl: Duration, bcrypt_cost: u32) -> Result<Self> {
        Ok(Self {
            issuer: TokenIssuer::new(secret, ttl),
            decoy_hash: hash_password("decoy-password-never-matches", bcrypt_cost)?,
        })
    }

    /// Token issuer used for signing and verification
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Verify a bearer token
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.issuer.verify(token)
    }

    /// Log in with `email` and `password`.
    ///
    /// Unknown email and wrong password both fail with
    /// [`Error::InvalidCredentials`].
    pub async fn login(&self, store: &Store, email: &str, password: &str) -> Result<LoginOutcome> {
        let user = store.find_by_field(Collection::Users, "email", &Value::String(email.to_string()));

        let stored_hash = user
            .as_ref()
            .and_then(|record| record.get_str("password"))
            .unwrap_or(self.decoy_hash.as_str())
            .to_string();

        let matches = verify_password_blocking(password.to_string(), stored_hash).await?;

        let identity = match user {
            Some(record) if matches => UserIdentity::from_record(&record).ok_or_else(|| {
                Error::internal("Stored user record is missing id, email or role")
            })?,
            _ => {
                warn!("Login failed: invalid credentials");
                return Err(Error::InvalidCredentials);
            }
        };

        let token = self.issuer.generate_token(&identity)?;
        info!(user_id = %identity.id, "User logged in");

        Ok(LoginOutcome {
            token,
            user: identity,
        })
    }
}
