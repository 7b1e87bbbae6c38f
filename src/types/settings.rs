use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of the site title, in characters.
pub const MAX_SITE_TITLE_CHARS: usize = 60;

/// Maximum length of the site icon (emoji, URL or data URI), in characters.
pub const MAX_SITE_ICON_CHARS: usize = 512;

/// Site-wide settings shown by the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub theme: Theme,
    pub site_title: String,
    pub site_icon: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            site_title: "个人书签".to_string(),
            site_icon: "🔖".to_string(),
        }
    }
}

/// Colour theme selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Forest,
    Ocean,
    Sunrise,
    Twilight,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Light,
        Theme::Dark,
        Theme::Forest,
        Theme::Ocean,
        Theme::Sunrise,
        Theme::Twilight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Forest => "forest",
            Theme::Ocean => "ocean",
            Theme::Sunrise => "sunrise",
            Theme::Twilight => "twilight",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Partial settings update. The theme stays a raw string so an unknown value
/// is reported as a validation error instead of a body parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub theme: Option<String>,
    pub site_title: Option<String>,
    pub site_icon: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.site_title.is_none() && self.site_icon.is_none()
    }
}
