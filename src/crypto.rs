//! Hashing primitives.
//!
//! Refresh tokens are never stored in plaintext. The session store keeps an
//! Argon2id hash in PHC string format (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`),
//! which records the algorithm, cost and salt alongside the digest so those
//! can change without invalidating existing sessions.

use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};
use password_hash::{PasswordHash, PasswordHasher as ArgonPasswordHasher, SaltString};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::AuthError;

/// Trait for salted one-way hashing of secret bytes.
///
/// The default implementation is [`Argon2Hasher`].
///
/// # Example
///
/// ```rust
/// use sessionguard::crypto::{Argon2Hasher, SecretHasher};
///
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash(b"refresh-token-bytes").unwrap();
/// assert!(hasher.verify(b"refresh-token-bytes", &hash).unwrap());
/// assert!(!hasher.verify(b"other-bytes", &hash).unwrap());
/// ```
pub trait SecretHasher: Send + Sync {
    /// Hash a secret with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if hashing fails.
    fn hash(&self, secret: &[u8]) -> Result<String, AuthError>;

    /// Verify a secret against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHashError` if the stored hash is malformed.
    fn verify(&self, secret: &[u8], hash: &str) -> Result<bool, AuthError>;
}

/// Argon2id hasher with configurable parameters.
///
/// ```rust
/// use sessionguard::crypto::Argon2Hasher;
///
/// // argon2 crate defaults (19 MiB, 2 iterations, 1 lane)
/// let hasher = Argon2Hasher::default();
///
/// // OWASP 2024 recommendations
/// let hasher = Argon2Hasher::production();
///
/// // Custom settings
/// let hasher = Argon2Hasher::new(32768, 4, 2);
/// ```
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    /// Memory cost in KiB
    memory_cost: u32,
    /// Number of iterations
    time_cost: u32,
    /// Degree of parallelism
    parallelism: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            memory_cost: 19456, // 19 MiB - argon2 default
            time_cost: 2,
            parallelism: 1,
        }
    }
}

impl Argon2Hasher {
    /// Creates a new hasher with custom parameters.
    ///
    /// # Arguments
    ///
    /// * `memory_cost` - Memory usage in KiB
    /// * `time_cost` - Number of iterations
    /// * `parallelism` - Number of lanes
    #[must_use]
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        Self {
            memory_cost,
            time_cost,
            parallelism,
        }
    }

    /// Parameters: 64 MiB memory, 3 iterations, 4 lanes.
    #[must_use]
    pub fn production() -> Self {
        Self {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, secret: &[u8]) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(self.memory_cost, self.time_cost, self.parallelism, None)
            .map_err(|_| AuthError::PasswordHashError)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        argon2
            .hash_password(secret, &salt)
            .map(|h| h.to_string())
            .map_err(|_| AuthError::PasswordHashError)
    }

    fn verify(&self, secret: &[u8], hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHashError)?;

        // params come from the stored hash, not from self
        Ok(Argon2::default().verify_password(secret, &parsed).is_ok())
    }
}

/// Derives a fixed-length symmetric key from arbitrary key material.
///
/// SHA-256 output is exactly the AES-256 key length, so no truncation is
/// needed.
pub fn derive_key(material: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(material);
    hasher.finalize().into()
}

/// Generates a fresh random token identifier (UUID v4, hyphenated).
pub fn generate_token_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
