//! Database bootstrap.
//!
//! Brings the relational store to a usable state before the server starts:
//! 1.  Creates the application database if it does not exist yet.
//! 2.  Opens the connection pool shared by every request.
//! 3.  Applies the embedded migrations that create the `books` table.

use crate::infra::config::DatabaseConfig;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgConnection, PgPool};

/// Connects to the configured database, creating and migrating it as needed.
pub async fn initialize(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    ensure_database_exists(config).await?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
        .with_context(|| format!("failed to connect to {}", config.connection_url()))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to apply migrations")?;

    tracing::info!(database = %config.database, "database ready");
    Ok(pool)
}

async fn ensure_database_exists(config: &DatabaseConfig) -> anyhow::Result<()> {
    if !validate_ident(&config.database) {
        anyhow::bail!("invalid database name: {:?}", config.database);
    }

    let mut conn = PgConnection::connect_with(&config.maintenance_options())
        .await
        .with_context(|| {
            format!(
                "failed to reach database server at {}:{}",
                config.host, config.port
            )
        })?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&config.database)
            .fetch_one(&mut conn)
            .await?;

    if !exists {
        // Identifiers cannot be bound as parameters; the name was validated above.
        let sql = format!("CREATE DATABASE \"{}\"", config.database);
        sqlx::query(&sql).execute(&mut conn).await?;
        tracing::info!(database = %config.database, "created database");
    }

    conn.close().await?;
    Ok(())
}

pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
