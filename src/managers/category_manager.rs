//! Category order store.
//!
//! Keeps the display sequence of categories in the `category_order` table.
//! Writes replace the whole table; categories absent from it sort last.

use std::collections::HashSet;

use rusqlite::{params, Connection};
use tracing::info;

use crate::types::category::CategoryOrder;
use crate::types::errors::CategoryError;

/// Trait defining category ordering operations.
pub trait CategoryManagerTrait {
    fn list_order(&self) -> Result<Vec<CategoryOrder>, CategoryError>;
    /// Replaces the stored order with `sequence`; each name's index is its order.
    fn reorder_categories(&mut self, sequence: &[String]) -> Result<(), CategoryError>;
}

/// Category order store backed by a SQLite connection.
pub struct CategoryManager<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> CategoryManagerTrait for CategoryManager<'a> {
    fn list_order(&self) -> Result<Vec<CategoryOrder>, CategoryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, position FROM category_order ORDER BY position")?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryOrder {
                category: row.get(0)?,
                order: row.get(1)?,
            })
        })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Names are trimmed; a repeated name keeps its first position.
    fn reorder_categories(&mut self, sequence: &[String]) -> Result<(), CategoryError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM category_order", [])?;

        let mut seen = HashSet::with_capacity(sequence.len());
        {
            let mut stmt =
                tx.prepare("INSERT INTO category_order (category, position) VALUES (?1, ?2)")?;
            let mut position: i64 = 0;
            for name in sequence.iter().map(|c| c.trim()) {
                if !seen.insert(name) {
                    continue;
                }
                stmt.execute(params![name, position])?;
                position += 1;
            }
        }
        tx.commit()?;

        info!(count = seen.len(), "category order replaced");
        Ok(())
    }
}
