use crate::storage::books::BookStore;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

/// Body accepted by the `/book` routes.
///
/// Absent or `null` fields take their zero value and unknown fields
/// (including `book_id`) are ignored.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(default)]
pub struct BookRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub book_name: String,
    /// Only read by create and update. Must also fit the `BIGINT` column.
    #[serde(deserialize_with = "null_as_default")]
    pub book_cost: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelope for health and error responses. Book routes answer with bare records.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
