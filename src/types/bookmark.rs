use serde::{Deserialize, Deserializer, Serialize};

/// Represents a saved bookmark.
///
/// `order` is the display position inside `category`; the orders of one
/// category always form the sequence `0..n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub category: String,
    pub description: Option<String>,
    pub visible: bool,
    pub order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields accepted when creating a bookmark.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
}

impl NewBookmark {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }
}

/// Partial update of a bookmark. Absent fields keep their stored value.
///
/// `description` tells an absent field (`None`) apart from an explicit
/// `null` (`Some(None)`), which clears the stored description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub visible: Option<bool>,
}

/// Wraps any value that is present in the body, `null` included.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trims a category name; missing or blank categories collapse to `""`.
pub fn normalize_category(category: Option<&str>) -> String {
    category.map(str::trim).unwrap_or_default().to_string()
}

/// Blank descriptions are stored as `NULL`.
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|d| !d.trim().is_empty())
}
