//! Storefront basket API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use storefront_api::error::AppError;
use storefront_api::state::AppState;
use storefront_basket::application::basket_service::BasketService;
use storefront_basket::repository::BasketRepository;
use storefront_basket_store::pg_basket_repository::PgBasketRepository;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting storefront basket API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
    let split_threshold = match std::env::var("SPLIT_THRESHOLD") {
        Ok(raw) => raw
            .parse::<Decimal>()
            .map_err(|e| AppError::Config(format!("SPLIT_THRESHOLD must be a decimal: {e}")))?,
        Err(_) => Decimal::ONE_HUNDRED,
    };

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    // Build application state.
    let basket_repository: Arc<dyn BasketRepository> = Arc::new(PgBasketRepository::new(pool));
    let basket_service =
        BasketService::with_split_threshold(Arc::clone(&basket_repository), split_threshold);
    let app_state = AppState::new(basket_service, basket_repository);

    let app = storefront_api::app(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
