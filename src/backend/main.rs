/**
 * Profiles Server Entry Point
 *
 * Loads configuration (`.env`, then the environment or the TOML file named
 * by `PROFILES_CONFIG`), initializes tracing and serves the API.
 */

use profiles_api::backend::server::init::create_app;
use profiles_api::shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("Server initialization started");

    let config = AppConfig::load().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        e
    })?;
    let addr = config.bind_address();

    let app = create_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
