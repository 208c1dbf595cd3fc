//! Book store implementation using PostgreSQL.

use super::BookStore;
use crate::domain::Book;
use anyhow::Result;
use sqlx::postgres::PgExecutor;
use sqlx::{PgPool, Postgres, Transaction};

const SELECT_BY_NAME: &str = "SELECT book_id, book_name, book_cost FROM books
     WHERE book_name = $1 ORDER BY book_id LIMIT 1";

/// A book store that uses a PostgreSQL connection pool.
///
/// Check-and-act operations run in one transaction that first takes
/// `pg_advisory_xact_lock(hashtext(name))`, so concurrent requests for the
/// same name are serialized and cannot insert duplicates.
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin_locked(&self, name: &str) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

async fn select_by_name<'e, E>(executor: E, name: &str) -> sqlx::Result<Option<Book>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Book>(SELECT_BY_NAME)
        .bind(name)
        .fetch_optional(executor)
        .await
}

async fn insert<'e, E>(executor: E, name: &str, cost: i64) -> sqlx::Result<Book>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Book>(
        "INSERT INTO books (book_name, book_cost) VALUES ($1, $2)
         RETURNING book_id, book_name, book_cost",
    )
    .bind(name)
    .bind(cost)
    .fetch_one(executor)
    .await
}

async fn set_cost<'e, E>(executor: E, book_id: i64, cost: i64) -> sqlx::Result<Option<Book>>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Book>(
        "UPDATE books SET book_cost = $2 WHERE book_id = $1
         RETURNING book_id, book_name, book_cost",
    )
    .bind(book_id)
    .bind(cost)
    .fetch_optional(executor)
    .await
}

async fn delete_first<'e, E>(executor: E, name: &str) -> sqlx::Result<u64>
where
    E: PgExecutor<'e>,
{
    let done = sqlx::query(
        "DELETE FROM books WHERE book_id = (
             SELECT book_id FROM books WHERE book_name = $1 ORDER BY book_id LIMIT 1
         )",
    )
    .bind(name)
    .execute(executor)
    .await?;
    Ok(done.rows_affected())
}

#[async_trait::async_trait]
impl BookStore for PgBookStore {
    async fn find_all(&self) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT book_id, book_name, book_cost FROM books ORDER BY book_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn find_one_by_name(&self, name: &str) -> Result<Option<Book>> {
        Ok(select_by_name(&self.pool, name).await?)
    }

    async fn create(&self, name: &str, cost: i64) -> Result<Book> {
        Ok(insert(&self.pool, name, cost).await?)
    }

    async fn update_cost(&self, book: &Book, new_cost: i64) -> Result<Book> {
        set_cost(&self.pool, book.id, new_cost)
            .await?
            .ok_or_else(|| anyhow::anyhow!("book {} no longer exists", book.id))
    }

    async fn delete_by_name(&self, name: &str) -> Result<()> {
        delete_first(&self.pool, name).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_if_absent(&self, name: &str, cost: i64) -> Result<Book> {
        let mut tx = self.begin_locked(name).await?;
        let existing = Book::or_zero(select_by_name(&mut *tx, name).await?);
        if !existing.is_found() {
            insert(&mut *tx, name, cost).await?;
        }
        let current = Book::or_zero(select_by_name(&mut *tx, name).await?);
        tx.commit().await?;
        Ok(current)
    }

    async fn update_cost_if_present(&self, name: &str, cost: i64) -> Result<Book> {
        let mut tx = self.begin_locked(name).await?;
        let existing = Book::or_zero(select_by_name(&mut *tx, name).await?);
        if !existing.is_found() {
            tx.commit().await?;
            return Ok(existing);
        }
        let updated = set_cost(&mut *tx, existing.id, cost)
            .await?
            .unwrap_or(existing);
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_if_present(&self, name: &str) -> Result<Book> {
        let mut tx = self.begin_locked(name).await?;
        let existing = Book::or_zero(select_by_name(&mut *tx, name).await?);
        if existing.is_found() {
            delete_first(&mut *tx, name).await?;
        }
        tx.commit().await?;
        Ok(existing)
    }
}
