use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use fd_api::{config::ApiConfig, state::ApiState};
use fd_store::{MemoryStore, PgStore, ResourceStore};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    fd_api::tracing::init_tracing(&config.env)?;
    let metrics_handle = fd_api::metrics::init_metrics()?;

    let store = open_store(&config).await?;
    let state = ApiState::new(&config, store);

    let cors = fd_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(fd_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = fd_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(fd_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            fd_api::middleware::request_id::request_id_middleware,
        ));
    let app = fd_api::middleware::security_headers::apply_security_headers(app, config.env);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        store_id = %config.store_id,
        environment = ?config.env,
        "server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

/// PostgreSQL when `DATABASE_URL` is set, an in-memory store otherwise.
async fn open_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn ResourceStore>> {
    match &config.database_url {
        Some(database_url) => {
            fd_store::ensure_database(database_url).await?;
            let pool =
                fd_store::create_pool(database_url, config.database_max_connections).await?;
            fd_store::migrate(&pool).await?;
            tracing::info!(store_id = %config.store_id, "using PostgreSQL store");
            Ok(Arc::new(PgStore::new(pool, config.store_id.clone())))
        }
        None => {
            tracing::warn!(
                store_id = %config.store_id,
                "DATABASE_URL not set, using in-memory store (data is lost on restart)"
            );
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
