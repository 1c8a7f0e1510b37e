//! Password hashing with bcrypt
//!
//! Hashing happens once at startup. Verification runs per login and is CPU
//! bound, so the async wrapper moves it onto tokio's blocking pool.

use crate::core::error::{Error, Result};

/// Hash `password` with the given bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Compare `password` with a stored hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            false
        }
    }
}

/// [`verify_password`] on the blocking pool
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| Error::internal(format!("Password check task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("s3cret", 4).unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", "plaintext-in-db"));
    }

    #[tokio::test]
    async fn test_verify_on_blocking_pool() {
        let hash = hash_password("pw", 4).unwrap();
        assert!(verify_password_blocking("pw".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password_blocking("other".to_string(), hash).await.unwrap());
    }
}
