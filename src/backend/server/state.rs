/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. It holds
 * the database pool, the token service and the loaded configuration.
 * `FromRef` implementations let handlers extract only the part they need,
 * e.g. `State(pool): State<SqlitePool>`.
 *
 * Every field is cheap to clone: the pool and config are reference counted
 * and the token service only holds key material.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenService;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,
    /// Issues and verifies bearer tokens
    pub tokens: TokenService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: AppConfig) -> Self {
        Self {
            db_pool,
            tokens: TokenService::from_config(&config),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
