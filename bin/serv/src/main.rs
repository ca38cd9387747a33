use std::{net::SocketAddr, sync::Arc};

use axum::{Router, middleware, routing::get};
use tc_api::{
    ApiConfig, ApiState,
    config::StoreBackend,
    metrics::MeteredDocumentStore,
    middleware::{cors::create_cors_layer, request_id::request_id_middleware},
};
use tc_db::{DocumentStore, InMemoryDocumentStore, LocalObjectStore, ObjectStore, PgDocumentStore};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    tc_api::tracing::init_tracing(&config.app_env);

    let metrics_handle = tc_api::metrics::init_metrics()?;
    tracing::info!("Prometheus metrics exporter initialized");

    let documents: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
            let pool = tc_db::create_pool(database_url, config.database_max_connections).await?;
            tc_db::ensure_db_and_migrate(database_url, &pool).await?;
            tracing::info!("Connected to Postgres, migrations applied");
            Arc::new(PgDocumentStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store, data is lost on restart");
            Arc::new(InMemoryDocumentStore::new())
        }
    };
    let documents: Arc<dyn DocumentStore> = Arc::new(MeteredDocumentStore::new(documents));

    let object_store = LocalObjectStore::new(&config.object_store_root, &config.objects_base_url());
    let object_root = object_store.root().clone();
    let objects: Arc<dyn ObjectStore> = Arc::new(object_store);

    let state = ApiState::new(&config, documents, objects);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(tc_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = tc_api::router::router()
        .nest_service("/objects", ServeDir::new(object_root))
        .with_state(state)
        .merge(metrics_app)
        .layer(create_cors_layer(config.allowed_origins()))
        .layer(trace_layer)
        .layer(middleware::from_fn(tc_api::metrics::track_metrics))
        .layer(middleware::from_fn(request_id_middleware));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        environment = ?config.app_env,
        backend = ?config.store_backend,
        "Server listening"
    );

    // Connect info lets the rate limiter fall back to the peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
