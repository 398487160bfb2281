use crate::types::{AppError, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Salted one-way hashing of user passwords.
///
/// Digests are Argon2id PHC strings, so salt and cost parameters travel with
/// the digest and verification needs nothing but the digest itself.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Creates a hasher with explicit Argon2 cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Internal(format!("Invalid hashing parameters: {}", e)))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a password with a freshly generated salt.
    ///
    /// CPU-bound; returns a self-describing PHC string.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    /// [`hash`](Self::hash) on the blocking pool, for use inside handlers.
    pub async fn hash_async(&self, password: &str) -> Result<String> {
        let hasher = self.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// Checks a candidate password against a stored digest.
    ///
    /// Runs on the blocking pool. A malformed digest yields `false`.
    pub async fn verify(&self, password: &str, digest: &str) -> bool {
        let password = password.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || verify_digest(&password, &digest))
            .await
            .unwrap_or(false)
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

fn verify_digest(password: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    // Cost parameters come from the digest itself.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
