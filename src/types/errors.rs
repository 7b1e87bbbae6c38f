use thiserror::Error;

// === BookmarkError ===

/// Errors related to bookmark store operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// Title or URL is missing or blank.
    #[error("Bookmark title and url are required")]
    MissingTitleOrUrl,
    /// Database operation failed.
    #[error("Bookmark database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for BookmarkError {
    fn from(e: rusqlite::Error) -> Self {
        BookmarkError::DatabaseError(e.to_string())
    }
}

// === CategoryError ===

/// Errors related to category ordering.
#[derive(Debug, Error)]
pub enum CategoryError {
    /// Database operation failed.
    #[error("Category database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for CategoryError {
    fn from(e: rusqlite::Error) -> Self {
        CategoryError::DatabaseError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The theme is not one of the supported themes.
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),
    /// The site title is longer than allowed.
    #[error("Site title exceeds 60 characters: {0}")]
    SiteTitleTooLong(usize),
    /// The site icon is longer than allowed.
    #[error("Site icon exceeds 512 characters: {0}")]
    SiteIconTooLong(usize),
    /// Database operation failed.
    #[error("Settings database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for SettingsError {
    fn from(e: rusqlite::Error) -> Self {
        SettingsError::DatabaseError(e.to_string())
    }
}

// === CryptoError ===

/// Errors related to cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Failed to derive a key from a password.
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
    /// Failed to generate random bytes.
    #[error("Random generation failed: {0}")]
    RandomGeneration(String),
}

// === AuthError ===

/// Errors raised by the auth gate.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password did not match the configured admin.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// No bearer token was supplied.
    #[error("Missing bearer token")]
    MissingToken,
    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,
    /// The token is malformed or its signature does not match.
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    /// Signing a new token failed.
    #[error("Token creation failed: {0}")]
    TokenCreation(String),
    /// Credential hashing failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

// === ConfigError ===

/// Errors raised while reading configuration or starting the logger.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment value could not be parsed.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    /// An existing `.env` file could not be read or parsed.
    #[error("Failed to load .env: {0}")]
    EnvFile(String),
    /// The tracing subscriber could not be installed.
    #[error("Logger error: {0}")]
    Logger(String),
}
