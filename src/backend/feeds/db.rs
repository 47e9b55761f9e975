/**
 * Feed Store
 *
 * Posts live in `feeds`; the liked-by relation is the `feed_likes` join
 * table whose primary key is `(feed_id, user_id)`, so a user can appear in
 * a post's liked-by set at most once.
 */

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::backend::feeds::types::{Feed, FeedItem, LikeAction};

fn feed_from_row(row: &SqliteRow) -> Result<Feed, sqlx::Error> {
    Ok(Feed {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        text: row.try_get("text")?,
        image: row.try_get("image")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn feed_item_from_row(row: &SqliteRow) -> Result<FeedItem, sqlx::Error> {
    Ok(FeedItem {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        author_name: row.try_get("author_name")?,
        text: row.try_get("text")?,
        image: row.try_get("image")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        likes_count: row.try_get("likes_count")?,
    })
}

/// Store a new post authored by `user_id`
pub async fn create_feed(
    pool: &SqlitePool,
    user_id: Uuid,
    text: Option<&str>,
    image: Option<&str>,
) -> Result<Feed, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query(
        r#"
        INSERT INTO feeds (id, user_id, text, image, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, text, image, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(text)
    .bind(image)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    feed_from_row(&row)
}

pub async fn get_feed_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Feed>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, text, image, created_at, updated_at
        FROM feeds
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(feed_from_row).transpose()
}

/// All posts, newest first, each with its like count
///
/// Counts come from one grouped join rather than a query per post.
pub async fn list_feeds_with_like_counts(pool: &SqlitePool) -> Result<Vec<FeedItem>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT f.id, f.user_id, u.name AS author_name, f.text, f.image,
               f.created_at, f.updated_at, COUNT(l.user_id) AS likes_count
        FROM feeds f
        JOIN users u ON u.id = f.user_id
        LEFT JOIN feed_likes l ON l.feed_id = f.id
        GROUP BY f.id
        ORDER BY f.created_at DESC, f.rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(feed_item_from_row).collect()
}

/// Flip `user_id`'s membership in the post's liked-by set
///
/// Runs in one transaction: delete the like if present, otherwise insert
/// it, then count. Returns the action taken and the count afterwards.
pub async fn toggle_like(
    pool: &SqlitePool,
    feed_id: Uuid,
    user_id: Uuid,
) -> Result<(LikeAction, i64), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM feed_likes WHERE feed_id = ? AND user_id = ?")
        .bind(feed_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
        > 0;

    let action = if removed {
        LikeAction::Unliked
    } else {
        sqlx::query("INSERT INTO feed_likes (feed_id, user_id, created_at) VALUES (?, ?, ?)")
            .bind(feed_id)
            .bind(user_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        LikeAction::Liked
    };

    let likes_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM feed_likes WHERE feed_id = ?")
        .bind(feed_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok((action, likes_count))
}
