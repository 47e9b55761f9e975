/**
 * Router Configuration
 *
 * Combines the route groups into a single axum router and wraps it in
 * the shared layers:
 *
 * 1. `TraceLayer` (outermost) logs every request and response
 * 2. The auth middleware resolves the bearer token, if any
 * 3. Route handlers
 *
 * Unknown paths get the standard JSON 404 body.
 */

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::feed_routes::configure_feed_routes;
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router);
    let router = configure_feed_routes(router);

    let router = router.fallback(|| async { BackendError::not_found("Not found.") });

    router
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
