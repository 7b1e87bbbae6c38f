use serde::{Deserialize, Serialize};

/// Display position of one category. Categories without an entry sort last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOrder {
    pub category: String,
    pub order: i64,
}
