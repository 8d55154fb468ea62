//! Diesel models for the ledger and alias tables.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Database row for the posts table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    /// Ledger path of the item
    pub path: String,
    /// When the item was last selected
    pub posted_at: DateTime<Utc>,
}

/// Database row for the names table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::names)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NameRow {
    /// Insertion order
    pub id: i32,
    /// Alias substring
    pub original: String,
    /// Replacement text
    pub replacement: String,
}
