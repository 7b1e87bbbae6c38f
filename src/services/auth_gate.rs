//! Auth gate for the admin surface.
//!
//! Checks the configured admin credentials and issues HS256 bearer tokens.
//! The admin password is only kept as a salted PBKDF2 hash; the plain copy
//! handed to [`AuthGate::new`] is zeroized once hashed.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use zeroize::Zeroize;

use crate::services::crypto_service::{CryptoService, CryptoServiceTrait, PasswordHash};
use crate::types::auth::Claims;
use crate::types::errors::AuthError;

/// Lifetime of an issued token.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Trait defining token issue and validation.
pub trait AuthGateTrait {
    /// Checks the credentials and returns a signed token for `username`.
    fn issue_token(&self, username: &str, password: &str) -> Result<String, AuthError>;
    /// Validates signature and expiry, returning the embedded claims.
    fn verify_token(&self, token: &str) -> Result<Claims, AuthError>;
}

pub struct AuthGate {
    admin_username: String,
    admin_password: PasswordHash,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    crypto: CryptoService,
    ttl: Duration,
}

impl AuthGate {
    pub fn new(
        admin_username: impl Into<String>,
        mut admin_password: String,
        secret: &[u8],
    ) -> Result<Self, AuthError> {
        let crypto = CryptoService::new();
        let hashed = crypto.hash_password(&admin_password);
        admin_password.zeroize();

        Ok(Self {
            admin_username: admin_username.into(),
            admin_password: hashed?,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            crypto,
            ttl: Duration::days(TOKEN_TTL_DAYS),
        })
    }

    /// Overrides the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn admin_username(&self) -> &str {
        &self.admin_username
    }

    /// Signs a token for `username` without a credential check.
    pub fn sign(&self, username: &str) -> Result<String, AuthError> {
        let iat = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: iat.timestamp(),
            exp: (iat + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }
}

impl AuthGateTrait for AuthGate {
    fn issue_token(&self, username: &str, password: &str) -> Result<String, AuthError> {
        // Always run the hash so a wrong username costs the same as a wrong password.
        let password_ok = self.crypto.verify_password(password, &self.admin_password);
        if username != self.admin_username || !password_ok {
            return Err(AuthError::InvalidCredentials);
        }
        self.sign(username)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or_else(|| AuthError::InvalidToken("expected a Bearer token".to_string()))?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
