//! Environment-driven configuration.
//!
//! Every value has a default so the service starts with no setup at all.
//! The credential defaults are insecure; [`Config::insecure_defaults`] lists
//! the ones still in use so startup can warn about them.

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::types::errors::ConfigError;

pub const DEFAULT_JWT_SECRET: &str = "bookmark-hub-insecure-dev-secret";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_DATABASE_PATH: &str = "bookmarks.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// A missing `.env` is fine; a malformed one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        env_file_loaded(dotenvy::dotenv())?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_raw = get("BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "BIND_ADDR".to_string(),
                message: format!("'{}': {}", bind_raw, e),
            })?;

        Ok(Self {
            jwt_secret: get("JWT_SECRET", DEFAULT_JWT_SECRET),
            admin_username: get("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            admin_password: get("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
            database_path: PathBuf::from(get("DATABASE_PATH", DEFAULT_DATABASE_PATH)),
            bind_addr,
            log_level: get("LOG_LEVEL", DEFAULT_LOG_LEVEL),
        })
    }

    /// Names of the credential variables still at their built-in defaults.
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            keys.push("JWT_SECRET");
        }
        if self.admin_password == DEFAULT_ADMIN_PASSWORD {
            keys.push("ADMIN_PASSWORD");
        }
        keys
    }
}

/// Maps the result of loading `.env`, treating an absent file as success.
fn env_file_loaded<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &"<redacted>")
            .field("database_path", &self.database_path)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .finish()
    }
}
