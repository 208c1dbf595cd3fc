pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use domain::Book;
pub use infra::config::{AppConfig, DatabaseConfig};
pub use storage::books::{BookStore, InMemoryBookStore, PgBookStore};
