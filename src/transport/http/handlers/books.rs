//! Book CRUD handlers.
//!
//! Every handler answers 200 with the resulting record. A lookup that matched
//! nothing yields the zero-value record (`book_name == ""`) rather than 404.

use crate::domain::Book;
use crate::transport::http::handlers::common::{decode_json, storable_cost, ApiError};
use crate::transport::http::types::{ApiResponse, AppState, BookRequest};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, Uri};
use axum::Json;

const NAME_ONLY: &str = r#"{"book_name": "..."}"#;
const NAME_AND_COST: &str = r#"{"book_name": "...", "book_cost": N}"#;

#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books", body = [Book]),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_books_handler(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.store.find_all().await?;
    tracing::debug!(count = books.len(), "listed books");
    Ok(Json(books))
}

#[utoipa::path(
    get,
    path = "/book",
    request_body = BookRequest,
    responses(
        (status = 200, description = "The book, or the zero-value record if absent", body = Book),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_book_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let request: BookRequest = decode_json(&body, NAME_ONLY)?;
    let book = Book::or_zero(state.store.find_one_by_name(&request.book_name).await?);
    tracing::debug!(name = %request.book_name, found = book.is_found(), "looked up book");
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/book",
    request_body = BookRequest,
    responses(
        (status = 200, description = "The stored book; an existing record is returned unchanged", body = Book),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_book_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let request: BookRequest = decode_json(&body, NAME_AND_COST)?;
    let cost = storable_cost(request.book_cost)?;
    let book = state
        .store
        .create_if_absent(&request.book_name, cost)
        .await?;
    tracing::info!(id = book.id, name = %book.name, cost = book.cost, "create book");
    Ok(Json(book))
}

#[utoipa::path(
    put,
    path = "/book",
    request_body = BookRequest,
    responses(
        (status = 200, description = "The updated book, or the zero-value record if absent", body = Book),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_book_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let request: BookRequest = decode_json(&body, NAME_AND_COST)?;
    let cost = storable_cost(request.book_cost)?;
    let book = state
        .store
        .update_cost_if_present(&request.book_name, cost)
        .await?;
    tracing::info!(name = %request.book_name, updated = book.is_found(), cost = book.cost, "update book");
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/book",
    request_body = BookRequest,
    responses(
        (status = 200, description = "Snapshot of the deleted book, or the zero-value record if absent", body = Book),
        (status = 422, description = "Invalid JSON body", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_book_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Book>, ApiError> {
    let request: BookRequest = decode_json(&body, NAME_ONLY)?;
    let book = state.store.delete_if_present(&request.book_name).await?;
    tracing::info!(name = %request.book_name, deleted = book.is_found(), "delete book");
    Ok(Json(book))
}

/// Fallback for methods the book routes do not serve.
pub async fn unsupported_method(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}
