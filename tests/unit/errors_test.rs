use bookmark_hub::types::errors::*;

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::NotFound("bm-1".to_string()).to_string(),
        "Bookmark not found: bm-1"
    );
    assert_eq!(
        BookmarkError::MissingTitleOrUrl.to_string(),
        "Bookmark title and url are required"
    );
    assert_eq!(
        BookmarkError::DatabaseError("connection lost".to_string()).to_string(),
        "Bookmark database error: connection lost"
    );
}

#[test]
fn bookmark_error_from_rusqlite() {
    let err: BookmarkError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, BookmarkError::DatabaseError(_)));
}

// === CategoryError Tests ===

#[test]
fn category_error_display() {
    assert_eq!(
        CategoryError::DatabaseError("locked".to_string()).to_string(),
        "Category database error: locked"
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::InvalidTheme("neon".to_string()).to_string(),
        "Invalid theme: neon"
    );
    assert_eq!(
        SettingsError::SiteTitleTooLong(61).to_string(),
        "Site title exceeds 60 characters: 61"
    );
    assert_eq!(
        SettingsError::SiteIconTooLong(600).to_string(),
        "Site icon exceeds 512 characters: 600"
    );
}

// === AuthError Tests ===

#[test]
fn auth_error_display_variants() {
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    assert_eq!(AuthError::MissingToken.to_string(), "Missing bearer token");
    assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
    assert_eq!(
        AuthError::InvalidToken("bad signature".to_string()).to_string(),
        "Invalid token: bad signature"
    );
}

#[test]
fn auth_error_wraps_crypto_error_transparently() {
    let err: AuthError = CryptoError::RandomGeneration("entropy exhausted".to_string()).into();
    assert_eq!(err.to_string(), "Random generation failed: entropy exhausted");
}

// === ConfigError Tests ===

#[test]
fn config_error_display() {
    let err = ConfigError::InvalidValue {
        key: "BIND_ADDR".to_string(),
        message: "not an address".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid value for BIND_ADDR: not an address");
    assert_eq!(
        ConfigError::EnvFile("line 3".to_string()).to_string(),
        "Failed to load .env: line 3"
    );
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(BookmarkError::NotFound("id".to_string()));
    assert!(err.source().is_none());
}
