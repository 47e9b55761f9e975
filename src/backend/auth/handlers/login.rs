/**
 * Login Handler
 *
 * POST /login/
 *
 * # Authentication Process
 *
 * 1. Require both email and password (400 otherwise)
 * 2. Look up user by email
 * 3. Verify password using bcrypt
 * 4. Issue a bearer token
 * 5. Return token and user info
 *
 * Unknown email and wrong password produce the same 401 body, so the
 * response never reveals which accounts exist.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse, UserResponse};
use crate::backend::auth::passwords::verify_password_async;
use crate::backend::auth::sessions::TokenService;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::profiles::validation::normalize_email;

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Login handler
///
/// # Example Request
///
/// ```http
/// POST /login/ HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "a@b.com", "password": "abcdefg" }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "message": "Login successful!",
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": "…", "email": "a@b.com", "name": "Alice", "role": "student" }
/// }
/// ```
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<TokenService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;

    if request.email.is_empty() || request.password.is_empty() {
        return Err(BackendError::bad_request("Email and password are required."));
    }
    let email = normalize_email(&request.email);
    tracing::info!("Login request for: {}", email);

    let user = get_user_by_email(&pool, &email).await?.ok_or_else(|| {
        tracing::warn!("Login for unknown email: {}", email);
        BackendError::authentication_failed(INVALID_CREDENTIALS)
    })?;

    if !verify_password_async(request.password, user.password_hash.clone()).await {
        tracing::warn!("Invalid password for user: {}", user.id);
        return Err(BackendError::authentication_failed(INVALID_CREDENTIALS));
    }

    let token = tokens.issue(user.id, &user.email).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token signing failed")
    })?;

    tracing::info!("User logged in successfully: {} ({})", user.id, user.email);

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        token,
        user: UserResponse::from(user),
    }))
}
