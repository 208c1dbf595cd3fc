use crate::domain::Book;
use crate::transport::http::handlers::{books, health};
use crate::transport::http::types::{ApiResponse, AppState, BookRequest};
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        books::list_books_handler,
        books::get_book_handler,
        books::create_book_handler,
        books::update_book_handler,
        books::delete_book_handler
    ),
    components(schemas(Book, BookRequest, ApiResponse))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/books",
            get(books::list_books_handler).fallback(books::unsupported_method),
        )
        .route(
            "/book",
            get(books::get_book_handler)
                .post(books::create_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler)
                .head(books::unsupported_method)
                .fallback(books::unsupported_method),
        )
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(app_state)
}
