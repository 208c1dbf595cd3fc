use crate::transport::http::types::ApiResponse;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::{DeserializeOwned, Error as _};

/// Failures surfaced at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid JSON body: {source} (expected: {expected})")]
    InvalidBody {
        source: serde_json::Error,
        expected: &'static str,
    },
    #[error("Invalid book_cost: {0} exceeds the largest storable cost ({max})", max = i64::MAX)]
    CostOutOfRange(u64),
    #[error("Method {method} is not supported on {path}")]
    MethodNotAllowed { method: Method, path: String },
    #[error("Storage failure: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody { .. } | ApiError::CostOutOfRange(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Store(_) => tracing::error!(error = %self, "request failed"),
            _ => tracing::warn!(error = %self, "request rejected"),
        }
        (
            status,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(self.to_string()),
            }),
        )
            .into_response()
    }
}

/// Decodes the first JSON value of a body without requiring a JSON `Content-Type`.
///
/// Bytes after that value are ignored; an empty body is an error.
pub fn decode_json<T: DeserializeOwned>(body: &[u8], expected: &'static str) -> Result<T, ApiError> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<T>()
        .next()
        .unwrap_or_else(|| Err(serde_json::Error::custom("EOF while parsing a value")));
    first.map_err(|source| ApiError::InvalidBody { source, expected })
}

/// Narrows a request cost to the `BIGINT` range of the `books` table.
pub fn storable_cost(cost: u64) -> Result<i64, ApiError> {
    i64::try_from(cost).map_err(|_| ApiError::CostOutOfRange(cost))
}
