use dotenvy::dotenv;
use pizza_restaurant_service::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod models;

use config::Config;
use handlers::{AppState, app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let db = Database::open(&config.database_url)?;
    info!(database_url = %config.database_url, "database ready");

    let app = app(AppState { db });

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Pizza API listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
