/**
 * Feed Routes
 *
 * - `GET  /feeds/`            - List posts with like counts
 * - `POST /feeds/`            - Create a post
 * - `POST /feeds/{id}/like/`  - Toggle a like
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::feeds::{create_feed, list_feeds, toggle_like};
use crate::backend::server::state::AppState;

pub fn configure_feed_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/feeds/", get(list_feeds).post(create_feed))
        .route("/feeds/{id}/like/", post(toggle_like))
}
