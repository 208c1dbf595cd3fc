//! Domain types for the library service.

pub mod book;

pub use book::Book;
