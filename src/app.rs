//! App core for Bookmark Hub.
//!
//! Owns the database handle and the auth gate shared by every request.

use std::sync::{Mutex, MutexGuard};

use tracing::info;

use crate::config::Config;
use crate::database::connection::Database;
use crate::services::auth_gate::AuthGate;

/// Central application struct shared across handlers.
///
/// Stores and the settings engine borrow the connection, so they are built
/// per request: `BookmarkManager::new(app.lock_db().connection())`.
pub struct App {
    db: Mutex<Database>,
    pub auth: AuthGate,
}

impl App {
    /// Opens the configured database and prepares the auth gate.
    pub fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open(&config.database_path)?;
        info!(path = %config.database_path.display(), "database ready");

        let auth = AuthGate::new(
            config.admin_username,
            config.admin_password,
            config.jwt_secret.as_bytes(),
        )?;

        Ok(Self::with_database(db, auth))
    }

    pub fn with_database(db: Database, auth: AuthGate) -> Self {
        Self {
            db: Mutex::new(db),
            auth,
        }
    }

    /// Locks the database for one unit of store work.
    ///
    /// Never hold the guard across an `.await`.
    pub fn lock_db(&self) -> MutexGuard<'_, Database> {
        self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
