use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::errors::CryptoError;

/// PBKDF2 iteration count for key derivation.
const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes for PBKDF2.
pub const SALT_LENGTH: usize = 16;

/// Derived key length in bytes.
pub const KEY_LENGTH: usize = 32;

/// A salted PBKDF2-HMAC-SHA256 password hash. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PasswordHash {
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Trait defining the cryptographic primitives used by the auth gate.
pub trait CryptoServiceTrait {
    /// Derives a key from a password and salt using PBKDF2.
    fn derive_key(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Hashes a password under a fresh random salt.
    fn hash_password(&self, password: &str) -> Result<PasswordHash, CryptoError>;

    /// Checks a candidate password against a stored hash in constant time.
    fn verify_password(&self, password: &str, stored: &PasswordHash) -> bool;

    /// Generates a cryptographically secure random salt.
    fn generate_salt(&self) -> Result<Vec<u8>, CryptoError>;

    /// Generates cryptographically secure random bytes of the specified length.
    fn generate_random_bytes(&self, length: usize) -> Result<Vec<u8>, CryptoError>;
}

/// Implementation of cryptographic services using the `ring` crate.
pub struct CryptoService {
    rng: SystemRandom,
}

impl CryptoService {
    /// Creates a new CryptoService instance.
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    fn iterations() -> Result<NonZeroU32, CryptoError> {
        NonZeroU32::new(PBKDF2_ITERATIONS)
            .ok_or_else(|| CryptoError::KeyDerivation("Invalid iteration count".to_string()))
    }
}

impl Default for CryptoService {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoServiceTrait for CryptoService {
    fn derive_key(&self, password: &str, salt: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut key = vec![0u8; KEY_LENGTH];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            Self::iterations()?,
            salt,
            password.as_bytes(),
            &mut key,
        );
        Ok(key)
    }

    fn hash_password(&self, password: &str) -> Result<PasswordHash, CryptoError> {
        let salt = self.generate_salt()?;
        let hash = self.derive_key(password, &salt)?;
        Ok(PasswordHash { salt, hash })
    }

    fn verify_password(&self, password: &str, stored: &PasswordHash) -> bool {
        let Ok(iterations) = Self::iterations() else {
            return false;
        };
        pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            &stored.salt,
            password.as_bytes(),
            &stored.hash,
        )
        .is_ok()
    }

    fn generate_salt(&self) -> Result<Vec<u8>, CryptoError> {
        self.generate_random_bytes(SALT_LENGTH)
    }

    fn generate_random_bytes(&self, length: usize) -> Result<Vec<u8>, CryptoError> {
        let mut bytes = vec![0u8; length];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| CryptoError::RandomGeneration("Failed to generate random bytes".to_string()))?;
        Ok(bytes)
    }
}
