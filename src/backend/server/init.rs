/**
 * Server Initialization
 *
 * Builds the Axum application from a loaded `AppConfig`:
 * 1. Open the database and run migrations
 * 2. Create the token service and application state
 * 3. Assemble the router with the auth middleware and request tracing
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing profiles backend");

    let db_pool = load_database(&config.database_url).await?;
    let app_state = AppState::new(db_pool, config);

    tracing::info!(
        "Token lifetime {}s, auth scheme {:?}",
        app_state.config.token_ttl_secs,
        app_state.config.bearer_keyword
    );

    Ok(create_router(app_state))
}
