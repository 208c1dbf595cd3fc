//! Process-local book store.

use super::BookStore;
use crate::domain::Book;
use anyhow::Result;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: Vec<Book>,
    next_id: i64,
}

/// A `Vec`-backed store with the same lookup semantics as the SQL store.
///
/// Uses the trait's non-atomic check-and-act defaults.
#[derive(Default)]
pub struct InMemoryBookStore {
    table: RwLock<Table>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_all(&self) -> Result<Vec<Book>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_one_by_name(&self, name: &str) -> Result<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|b| b.name == name).cloned())
    }

    async fn create(&self, name: &str, cost: i64) -> Result<Book> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let book = Book {
            id: table.next_id,
            name: name.to_string(),
            cost,
        };
        table.rows.push(book.clone());
        Ok(book)
    }

    async fn update_cost(&self, book: &Book, new_cost: i64) -> Result<Book> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .iter_mut()
            .find(|b| b.id == book.id)
            .ok_or_else(|| anyhow::anyhow!("book {} no longer exists", book.id))?;
        row.cost = new_cost;
        Ok(row.clone())
    }

    async fn delete_by_name(&self, name: &str) -> Result<()> {
        let mut table = self.table.write().await;
        if let Some(pos) = table.rows.iter().position(|b| b.name == name) {
            table.rows.remove(pos);
        }
        Ok(())
    }
}
