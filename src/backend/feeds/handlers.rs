/**
 * Feed Handlers
 *
 * GET  /feeds/            - List posts with like counts
 * POST /feeds/            - Create a post (teachers only)
 * POST /feeds/{id}/like/  - Toggle the caller's like (students only)
 *
 * All three require an authenticated user.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::feeds::db;
use crate::backend::feeds::types::{CreateFeedRequest, FeedItem, LikeToggleResponse};
use crate::backend::middleware::AuthUser;

pub async fn list_feeds(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> ApiResult<Json<Vec<FeedItem>>> {
    let feeds = db::list_feeds_with_like_counts(&pool).await?;
    tracing::debug!("Listed {} feeds for {}", feeds.len(), auth.user.id);
    Ok(Json(feeds))
}

/// Publish a post as the calling teacher
pub async fn create_feed(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<CreateFeedRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FeedItem>)> {
    if !auth.user.role.can_publish() {
        tracing::warn!("User {} ({}) tried to create a feed", auth.user.id, auth.user.role);
        return Err(BackendError::forbidden("Only teachers can create feeds."));
    }

    let Json(request) = payload?;
    request.validate()?;

    let feed = db::create_feed(
        &pool,
        auth.user.id,
        request.text.as_deref(),
        request.image.as_deref(),
    )
    .await?;

    tracing::info!("Feed {} created by {}", feed.id, auth.user.id);

    Ok((
        StatusCode::CREATED,
        Json(FeedItem {
            id: feed.id,
            user_id: feed.user_id,
            author_name: auth.user.name,
            text: feed.text,
            image: feed.image,
            created_at: feed.created_at,
            updated_at: feed.updated_at,
            likes_count: 0,
        }),
    ))
}

/// Like the post if the caller hasn't yet, unlike it otherwise
pub async fn toggle_like(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<LikeToggleResponse>> {
    let Path(feed_id) = path?;

    let feed = db::get_feed_by_id(&pool, feed_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Feed not found."))?;

    if !auth.user.role.can_like() {
        tracing::warn!("User {} ({}) tried to like feed {}", auth.user.id, auth.user.role, feed.id);
        return Err(BackendError::forbidden("Only students can like feeds."));
    }

    let (action, likes_count) = db::toggle_like(&pool, feed.id, auth.user.id).await?;
    tracing::info!("User {} {:?} feed {} (now {})", auth.user.id, action, feed.id, likes_count);

    Ok(Json(LikeToggleResponse {
        action,
        likes_count,
    }))
}
