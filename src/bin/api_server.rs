// src/bin/api_server.rs

use library_app::app::database;
use library_app::infra::config::AppConfig;
use library_app::infra::telemetry;
use library_app::storage::books::PgBookStore;
use library_app::transport;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;

    // --- Store Initialization ---
    tracing::info!(url = %config.database.connection_url(), "initializing database");
    let pool = database::initialize(&config.database).await?;
    let app_state = transport::http::AppState::new(Arc::new(PgBookStore::new(pool)));

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
