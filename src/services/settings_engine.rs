// Bookmark Hub Settings Engine
// Manages site settings: reading them merged over defaults, validated partial updates, reset.
// Settings are stored as key-value rows in the `settings` table.

use rusqlite::{params, Connection};
use tracing::{info, warn};

use crate::types::errors::SettingsError;
use crate::types::settings::{
    SettingsPatch, SiteSettings, Theme, MAX_SITE_ICON_CHARS, MAX_SITE_TITLE_CHARS,
};

const KEY_THEME: &str = "theme";
const KEY_SITE_TITLE: &str = "siteTitle";
const KEY_SITE_ICON: &str = "siteIcon";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn get_settings(&self) -> Result<SiteSettings, SettingsError>;
    fn update(&mut self, patch: &SettingsPatch) -> Result<SiteSettings, SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
}

/// Settings engine backed by the `settings` table.
pub struct SettingsEngine<'a> {
    conn: &'a Connection,
}

impl<'a> SettingsEngine<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Checks every provided field. Returns the parsed theme, if any.
    pub fn validate(patch: &SettingsPatch) -> Result<Option<Theme>, SettingsError> {
        let theme = match patch.theme.as_deref() {
            Some(raw) => Some(
                raw.parse::<Theme>()
                    .map_err(SettingsError::InvalidTheme)?,
            ),
            None => None,
        };

        if let Some(title) = &patch.site_title {
            let len = title.chars().count();
            if len > MAX_SITE_TITLE_CHARS {
                return Err(SettingsError::SiteTitleTooLong(len));
            }
        }

        if let Some(icon) = &patch.site_icon {
            let len = icon.chars().count();
            if len > MAX_SITE_ICON_CHARS {
                return Err(SettingsError::SiteIconTooLong(len));
            }
        }

        Ok(theme)
    }
}

impl<'a> SettingsEngineTrait for SettingsEngine<'a> {
    /// Returns stored values merged over [`SiteSettings::default`].
    fn get_settings(&self) -> Result<SiteSettings, SettingsError> {
        let mut settings = SiteSettings::default();

        let mut stmt = self.conn.prepare("SELECT key, value FROM settings")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            match key.as_str() {
                KEY_THEME => match value.parse::<Theme>() {
                    Ok(theme) => settings.theme = theme,
                    Err(raw) => warn!(theme = %raw, "ignoring unknown stored theme"),
                },
                KEY_SITE_TITLE => settings.site_title = value,
                KEY_SITE_ICON => settings.site_icon = value,
                _ => {}
            }
        }

        Ok(settings)
    }

    /// Validates the whole patch before writing anything, then upserts only
    /// the provided fields.
    fn update(&mut self, patch: &SettingsPatch) -> Result<SiteSettings, SettingsError> {
        let theme = Self::validate(patch)?;
        if patch.is_empty() {
            return self.get_settings();
        }

        let mut updates: Vec<(&str, &str)> = Vec::with_capacity(3);
        if let Some(theme) = &theme {
            updates.push((KEY_THEME, theme.as_str()));
        }
        if let Some(title) = &patch.site_title {
            updates.push((KEY_SITE_TITLE, title));
        }
        if let Some(icon) = &patch.site_icon {
            updates.push((KEY_SITE_ICON, icon));
        }

        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in &updates {
            tx.execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
        }
        tx.commit()?;
        match theme {
            Some(theme) => info!(fields = updates.len(), %theme, "settings updated"),
            None => info!(fields = updates.len(), "settings updated"),
        }

        self.get_settings()
    }

    /// Drops all stored values so the defaults apply again.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.conn.execute("DELETE FROM settings", [])?;
        info!("settings reset to defaults");
        Ok(())
    }
}
