/**
 * Profile Handlers
 *
 * GET    /profile/          - List users (optional ?search=)
 * POST   /profile/          - Register a user
 * GET    /profile/{id}/     - Retrieve one user
 * PUT    /profile/{id}/     - Full update (self only)
 * PATCH  /profile/{id}/     - Partial update (self only)
 * DELETE /profile/{id}/     - Delete (self only)
 *
 * Reads and registration are open to anonymous callers; updates and
 * deletes need a bearer token belonging to the target user.
 */

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::passwords::hash_password_async;
use crate::backend::auth::users::{
    create_user, delete_user, email_taken, get_user_by_id, list_users,
    search_users_by_name_or_email, update_user, NewUser, User, UserChanges,
};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{AuthUser, MaybeAuthUser};
use crate::backend::profiles::validation::{
    validate_profile, Presence, ProfileInput, ProfilePayload, EMAIL_TAKEN,
};
use crate::shared::{AppConfig, SharedError};

const USER_NOT_FOUND: &str = "User not found";

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Body returned by create and update
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub message: String,
    pub data: UserResponse,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// List users, optionally filtered by a case-insensitive substring of
/// name or email
pub async fn list_profiles(
    State(pool): State<SqlitePool>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = match params.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => {
            tracing::debug!("Searching users for {:?}", term);
            search_users_by_name_or_email(&pool, term).await?
        }
        _ => list_users(&pool).await?,
    };

    tracing::debug!(
        "Listed {} users (viewer: {:?})",
        users.len(),
        viewer.as_ref().map(|v| v.user.id)
    );

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn get_profile(
    State(pool): State<SqlitePool>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Path(id) = path?;

    let user = get_user_by_id(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    Ok(Json(UserResponse::from(user)))
}

/// Register a new user
pub async fn create_profile(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProfileResponse>)> {
    let Json(payload) = payload?;

    let input = check_profile(&pool, payload, Presence::AllRequired, None).await?;
    let (Some(email), Some(name), Some(password), Some(role)) =
        (input.email, input.name, input.password, input.role)
    else {
        return Err(BackendError::internal("validated profile is missing fields"));
    };

    let password_hash = hash_password_async(password, config.bcrypt_cost).await?;
    let user = create_user(
        &pool,
        NewUser {
            email,
            name,
            password_hash,
            role,
        },
    )
    .await
    .map_err(email_conflict)?;

    tracing::info!("User registered: {} ({}, {})", user.id, user.email, user.role);

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            message: "User created successfully!".to_string(),
            data: UserResponse::from(user),
        }),
    ))
}

/// Replace all profile fields (PUT)
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(auth): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> ApiResult<Json<ProfileResponse>> {
    let Path(id) = path?;

    let user = apply_update(&pool, &config, &auth.user, id, payload, Presence::AllRequired).await?;

    Ok(Json(ProfileResponse {
        message: "User fully updated!".to_string(),
        data: UserResponse::from(user),
    }))
}

/// Change only the supplied profile fields (PATCH)
pub async fn partial_update_profile(
    State(pool): State<SqlitePool>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(auth): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
) -> ApiResult<Json<ProfileResponse>> {
    let Path(id) = path?;

    let user = apply_update(&pool, &config, &auth.user, id, payload, Presence::Partial).await?;

    Ok(Json(ProfileResponse {
        message: "User partially updated!".to_string(),
        data: UserResponse::from(user),
    }))
}

pub async fn delete_profile(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;

    let target = get_user_by_id(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    if target.id != auth.user.id {
        tracing::warn!("User {} tried to delete user {}", auth.user.id, target.id);
        return Err(BackendError::forbidden(
            "You are not allowed to delete other users.",
        ));
    }

    if !delete_user(&pool, target.id).await? {
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }

    tracing::info!("User deleted: {} ({})", target.id, target.email);

    Ok(Json(MessageResponse {
        message: "User deleted successfully!".to_string(),
    }))
}

/// Shared body of PUT and PATCH
///
/// Existence is checked before ownership, so a missing id is a 404 for
/// every caller. The body is only looked at once the caller owns the
/// record; editing someone else is a 403 whatever was sent.
async fn apply_update(
    pool: &SqlitePool,
    config: &AppConfig,
    caller: &User,
    id: Uuid,
    payload: Result<Json<ProfilePayload>, JsonRejection>,
    presence: Presence,
) -> ApiResult<User> {
    let target = get_user_by_id(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    if target.id != caller.id {
        tracing::warn!("User {} tried to edit user {}", caller.id, target.id);
        return Err(BackendError::forbidden(
            "You are not allowed to edit other users.",
        ));
    }

    let Json(payload) = payload?;
    let input = check_profile(pool, payload, presence, Some(target.id)).await?;

    let password_hash = match input.password {
        Some(password) => Some(hash_password_async(password, config.bcrypt_cost).await?),
        None => None,
    };

    let changes = UserChanges {
        email: input.email,
        name: input.name,
        password_hash,
        role: input.role,
    };

    let user = update_user(pool, target.id, changes)
        .await
        .map_err(email_conflict)?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    tracing::info!("User updated: {} ({})", user.id, user.email);
    Ok(user)
}

/// Field validation followed by the email uniqueness check
async fn check_profile(
    pool: &SqlitePool,
    payload: ProfilePayload,
    presence: Presence,
    excluding: Option<Uuid>,
) -> ApiResult<ProfileInput> {
    let (input, mut errors) = validate_profile(payload, presence);

    if let Some(email) = &input.email {
        if email_taken(pool, email, excluding).await? {
            errors
                .entry("email".to_string())
                .or_default()
                .push(EMAIL_TAKEN.to_string());
        }
    }

    if !errors.is_empty() {
        return Err(SharedError::validation_errors(errors).into());
    }
    Ok(input)
}

/// A concurrent registration can slip past `email_taken`; the unique index
/// still catches it
fn email_conflict(err: sqlx::Error) -> BackendError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            SharedError::validation("email", EMAIL_TAKEN).into()
        }
        _ => err.into(),
    }
}
