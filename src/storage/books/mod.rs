//! Record store for books.
//!
//! Handlers only see [`BookStore`]. The primitive operations mirror a plain
//! find/create/update/delete query interface; the `*_if_present` /
//! `*_if_absent` operations are the lookup-then-mutate sequences the HTTP
//! layer performs.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBookStore;
pub use postgres::PgBookStore;

use crate::domain::Book;
use anyhow::Result;

#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    /// Every row, in store order (ascending `book_id`).
    async fn find_all(&self) -> Result<Vec<Book>>;

    /// First row whose name equals `name`.
    async fn find_one_by_name(&self, name: &str) -> Result<Option<Book>>;

    /// Inserts a row and returns it with its assigned id. Does not check for duplicates.
    async fn create(&self, name: &str, cost: i64) -> Result<Book>;

    /// Sets `cost` on the row identified by `book.id` and returns the updated row.
    async fn update_cost(&self, book: &Book, new_cost: i64) -> Result<Book>;

    /// Removes the first row whose name equals `name`.
    async fn delete_by_name(&self, name: &str) -> Result<()>;

    /// Liveness probe for the backing engine.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Inserts `name` unless a record is already found, then returns the current record.
    ///
    /// The default composes primitives and is not atomic: concurrent callers may
    /// both observe "not found" and insert duplicates.
    async fn create_if_absent(&self, name: &str, cost: i64) -> Result<Book> {
        let existing = Book::or_zero(self.find_one_by_name(name).await?);
        if !existing.is_found() {
            self.create(name, cost).await?;
        }
        Ok(Book::or_zero(self.find_one_by_name(name).await?))
    }

    /// Updates the cost of the found record; returns the zero value if none was found.
    async fn update_cost_if_present(&self, name: &str, cost: i64) -> Result<Book> {
        let existing = Book::or_zero(self.find_one_by_name(name).await?);
        if !existing.is_found() {
            return Ok(existing);
        }
        self.update_cost(&existing, cost).await
    }

    /// Deletes the found record and returns its pre-delete snapshot.
    async fn delete_if_present(&self, name: &str) -> Result<Book> {
        let existing = Book::or_zero(self.find_one_by_name(name).await?);
        if existing.is_found() {
            self.delete_by_name(name).await?;
        }
        Ok(existing)
    }
}
