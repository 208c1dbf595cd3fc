//! The book record: the only entity the library persists.

use serde::Serialize;
use utoipa::ToSchema;

/// A row of the `books` table.
///
/// `Book::default()` is the zero-value record. Lookups that match nothing
/// resolve to it, so the wire format carries "not found" as an empty
/// `book_name` rather than a distinct status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Book {
    /// Surrogate key assigned by the store.
    #[serde(rename = "book_id")]
    #[sqlx(rename = "book_id")]
    pub id: i64,
    #[serde(rename = "book_name")]
    #[sqlx(rename = "book_name")]
    pub name: String,
    #[serde(rename = "book_cost")]
    #[sqlx(rename = "book_cost")]
    pub cost: i64,
}

impl Book {
    /// Whether this record came from the store.
    ///
    /// An empty name is treated as "not found", including for a row that was
    /// actually stored with an empty name.
    pub fn is_found(&self) -> bool {
        !self.name.is_empty()
    }

    /// Collapses an optional lookup into the zero-value convention.
    pub fn or_zero(found: Option<Book>) -> Book {
        found.unwrap_or_default()
    }
}
