/**
 * API Routes
 *
 * ## Profiles
 * - `GET    /profile/`       - List or search users
 * - `POST   /profile/`       - Register
 * - `GET    /profile/{id}/`  - Retrieve
 * - `PUT    /profile/{id}/`  - Full update
 * - `PATCH  /profile/{id}/`  - Partial update
 * - `DELETE /profile/{id}/`  - Delete
 *
 * ## Authentication
 * - `POST /login/` - Exchange email and password for a token
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::login;
use crate::backend::profiles::{
    create_profile, delete_profile, get_profile, list_profiles, partial_update_profile,
    update_profile,
};
use crate::backend::server::state::AppState;

/// Add the profile and login routes to `router`
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/profile/", get(list_profiles).post(create_profile))
        .route(
            "/profile/{id}/",
            get(get_profile)
                .put(update_profile)
                .patch(partial_update_profile)
                .delete(delete_profile),
        )
        .route("/login/", post(login))
}
