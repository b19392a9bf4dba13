use axum::{Router, routing::get};
use mza_api::{
    config::ApiConfig,
    metrics,
    middleware::{cors::create_cors_layer, request_id::request_id_middleware},
    state::ApiState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    mza_api::tracing::init_tracing(&config.env);
    let metrics_handle = metrics::init_metrics()?;

    // Initialize the application state (spawns the progress flush task)
    let state = ApiState::new(&config);

    let metrics_router = Router::new()
        .route("/metrics", get(metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = mza_api::router::router()
        .with_state(state)
        .merge(metrics_router)
        .layer(axum::middleware::from_fn(metrics::track_metrics))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(create_cors_layer(config.allowed_origins.clone()));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server running on http://{}:{}", config.host, config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
