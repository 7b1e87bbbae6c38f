//! Bookmark store.
//!
//! Implements `BookmarkManagerTrait`: CRUD and reordering for bookmarks,
//! backed by SQLite via `rusqlite`.
//!
//! Every bookmark has a `position` inside its category. The positions of one
//! category are kept contiguous from 0: creating appends, moving to another
//! category appends there and closes the hole left behind, deleting closes
//! the hole. Multi-statement operations run in a single transaction.

use std::collections::{HashMap, HashSet};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::types::bookmark::{
    normalize_category, normalize_description, Bookmark, BookmarkPatch, NewBookmark,
};
use crate::types::errors::BookmarkError;

/// Columns selected for every bookmark row, in `row_to_bookmark` order.
const BOOKMARK_COLUMNS: &str = "b.id, b.title, b.url, b.category, b.description, b.visible, \
                                b.position, b.created_at, b.updated_at";

/// Trait defining bookmark store operations.
pub trait BookmarkManagerTrait {
    /// All bookmarks by category display order, then position.
    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    /// Same ordering as [`list`](Self::list), hidden bookmarks left out.
    fn list_visible(&self) -> Result<Vec<Bookmark>, BookmarkError>;
    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError>;
    fn create(&mut self, data: NewBookmark) -> Result<Bookmark, BookmarkError>;
    fn update(&mut self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, BookmarkError>;
    /// Removes a bookmark and returns it as it was stored.
    fn delete(&mut self, id: &str) -> Result<Bookmark, BookmarkError>;
    fn reorder(&mut self, ids: &[String]) -> Result<(), BookmarkError>;
    /// Distinct categories in display order.
    fn categories(&self, include_hidden: bool) -> Result<Vec<String>, BookmarkError>;
}

/// Bookmark manager backed by a SQLite connection.
pub struct BookmarkManager<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkManager<'a> {
    /// Creates a new `BookmarkManager` using the provided database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            category: row.get(3)?,
            description: row.get(4)?,
            visible: row.get(5)?,
            order: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn fetch(conn: &Connection, id: &str) -> Result<Option<Bookmark>, BookmarkError> {
        let sql = format!("SELECT {BOOKMARK_COLUMNS} FROM bookmarks b WHERE b.id = ?1");
        Ok(conn
            .query_row(&sql, params![id], Self::row_to_bookmark)
            .optional()?)
    }

    fn fetch_all(conn: &Connection, visible_only: bool) -> Result<Vec<Bookmark>, BookmarkError> {
        let filter = if visible_only { "WHERE b.visible = 1" } else { "" };
        let sql = format!(
            "SELECT {BOOKMARK_COLUMNS} FROM bookmarks b \
             LEFT JOIN category_order c ON c.category = b.category \
             {filter} \
             ORDER BY c.position IS NULL, c.position, b.category, b.position"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_bookmark)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Position a bookmark appended to `category` would get.
    fn next_position(conn: &Connection, category: &str) -> Result<i64, BookmarkError> {
        Ok(conn.query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM bookmarks WHERE category = ?1",
            params![category],
            |row| row.get(0),
        )?)
    }

    /// Shifts every bookmark after `position` in `category` up by one.
    fn close_gap(conn: &Connection, category: &str, position: i64) -> Result<usize, BookmarkError> {
        Ok(conn.execute(
            "UPDATE bookmarks SET position = position - 1 WHERE category = ?1 AND position > ?2",
            params![category, position],
        )?)
    }

    /// Rejects blank values; anything else is stored as given.
    fn required(value: String) -> Result<String, BookmarkError> {
        if value.trim().is_empty() {
            return Err(BookmarkError::MissingTitleOrUrl);
        }
        Ok(value)
    }
}

impl<'a> BookmarkManagerTrait for BookmarkManager<'a> {
    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        Self::fetch_all(self.conn, false)
    }

    fn list_visible(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        Self::fetch_all(self.conn, true)
    }

    fn get(&self, id: &str) -> Result<Bookmark, BookmarkError> {
        Self::fetch(self.conn, id)?.ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    /// Appends a new bookmark to the end of its category.
    fn create(&mut self, data: NewBookmark) -> Result<Bookmark, BookmarkError> {
        let title = Self::required(data.title)?;
        let url = Self::required(data.url)?;
        let category = normalize_category(data.category.as_deref());
        let description = normalize_description(data.description);
        let visible = data.visible.unwrap_or(true);

        let tx = self.conn.unchecked_transaction()?;
        let id = Uuid::new_v4().to_string();
        let now = Self::now();
        let position = Self::next_position(&tx, &category)?;

        tx.execute(
            "INSERT INTO bookmarks (id, title, url, category, description, visible, position, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![id, title, url, category, description, visible, position, now, now],
        )?;
        tx.commit()?;

        info!(%id, %category, position, "bookmark created");
        Ok(Bookmark {
            id,
            title,
            url,
            category,
            description,
            visible,
            order: position,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update. A category change moves the bookmark to the
    /// end of the new category.
    fn update(&mut self, id: &str, patch: BookmarkPatch) -> Result<Bookmark, BookmarkError> {
        let tx = self.conn.unchecked_transaction()?;
        let current =
            Self::fetch(&tx, id)?.ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        let title = match patch.title {
            Some(t) => Self::required(t)?,
            None => current.title.clone(),
        };
        let url = match patch.url {
            Some(u) => Self::required(u)?,
            None => current.url.clone(),
        };
        let description = match patch.description {
            Some(d) => normalize_description(d),
            None => current.description.clone(),
        };
        let visible = patch.visible.unwrap_or(current.visible);
        let category = match patch.category {
            Some(c) => normalize_category(Some(&c)),
            None => current.category.clone(),
        };

        let position = if category != current.category {
            Self::close_gap(&tx, &current.category, current.order)?;
            let position = Self::next_position(&tx, &category)?;
            debug!(%id, from = %current.category, to = %category, position, "bookmark moved");
            position
        } else {
            current.order
        };

        let now = Self::now();
        tx.execute(
            "UPDATE bookmarks SET title = ?1, url = ?2, category = ?3, description = ?4, \
             visible = ?5, position = ?6, updated_at = ?7 WHERE id = ?8",
            params![title, url, category, description, visible, position, now, id],
        )?;
        tx.commit()?;

        info!(%id, "bookmark updated");
        Ok(Bookmark {
            id: current.id,
            title,
            url,
            category,
            description,
            visible,
            order: position,
            created_at: current.created_at,
            updated_at: now,
        })
    }

    fn delete(&mut self, id: &str) -> Result<Bookmark, BookmarkError> {
        let tx = self.conn.unchecked_transaction()?;
        let removed =
            Self::fetch(&tx, id)?.ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;

        tx.execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        Self::close_gap(&tx, &removed.category, removed.order)?;
        tx.commit()?;

        info!(%id, category = %removed.category, "bookmark deleted");
        Ok(removed)
    }

    /// Renumbers bookmarks following `ids`.
    ///
    /// The listed ids come first in the given order, then every bookmark not
    /// listed in its current display order. Positions are handed out as a
    /// running index within each category, so a category's positions stay
    /// `0..n`. Unknown and repeated ids are ignored.
    fn reorder(&mut self, ids: &[String]) -> Result<(), BookmarkError> {
        let tx = self.conn.unchecked_transaction()?;
        let current = Self::fetch_all(&tx, false)?;
        let by_id: HashMap<&str, &Bookmark> =
            current.iter().map(|b| (b.id.as_str(), b)).collect();

        let mut seen: HashSet<&str> = HashSet::with_capacity(current.len());
        let mut sequence: Vec<&Bookmark> = Vec::with_capacity(current.len());
        for id in ids {
            if let Some(&bookmark) = by_id.get(id.as_str()) {
                if seen.insert(bookmark.id.as_str()) {
                    sequence.push(bookmark);
                }
            }
        }
        for bookmark in &current {
            if seen.insert(bookmark.id.as_str()) {
                sequence.push(bookmark);
            }
        }

        {
            let mut stmt = tx.prepare("UPDATE bookmarks SET position = ?1 WHERE id = ?2")?;
            let mut next_index: HashMap<&str, i64> = HashMap::new();
            for bookmark in sequence {
                let index = next_index.entry(bookmark.category.as_str()).or_insert(0);
                stmt.execute(params![*index, bookmark.id])?;
                *index += 1;
            }
        }
        tx.commit()?;

        info!(count = current.len(), requested = ids.len(), "bookmarks reordered");
        Ok(())
    }

    fn categories(&self, include_hidden: bool) -> Result<Vec<String>, BookmarkError> {
        let filter = if include_hidden { "" } else { "WHERE b.visible = 1" };
        let sql = format!(
            "SELECT DISTINCT b.category, c.position FROM bookmarks b \
             LEFT JOIN category_order c ON c.category = b.category \
             {filter} \
             ORDER BY c.position IS NULL, c.position, b.category"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
