/**
 * User Model and Database Operations
 *
 * The credential store: user records keyed by UUID with a globally unique
 * email as the sole login identifier. Deleting a user cascades to the
 * user's feed posts and like rows (see `migrations/`).
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::Role;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Login identifier, unique across all users
    pub email: String,
    /// Display name
    pub name: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: Role,
}

/// Column changes for an update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    let role: String = row.try_get("role")?;
    let role = role
        .parse::<Role>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        role,
        is_active: row.try_get("is_active")?,
        is_staff: row.try_get("is_staff")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Create a new user
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query(
        r#"
        INSERT INTO users (id, email, name, password_hash, role, is_active, is_staff, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 1, 0, ?, ?)
        RETURNING id, email, name, password_hash, role, is_active, is_staff, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.name)
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    user_from_row(&row)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, email, name, password_hash, role, is_active, is_staff, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get user by email
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, email, name, password_hash, role, is_active, is_staff, created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Whether another user already holds this email
///
/// `excluding` lets an update keep its own address.
pub async fn email_taken(
    pool: &SqlitePool,
    email: &str,
    excluding: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM users
        WHERE email = ? AND (? IS NULL OR id != ?)
        "#,
    )
    .bind(email)
    .bind(excluding)
    .bind(excluding)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// List all users in registration order
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, email, name, password_hash, role, is_active, is_staff, created_at, updated_at
        FROM users
        ORDER BY created_at, rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(user_from_row).collect()
}

/// Users whose name or email contains `term`, ignoring case
///
/// SQLite's `lower()` and `LIKE` only fold ASCII, so matching happens here
/// with Unicode case folding on both sides.
pub async fn search_users_by_name_or_email(
    pool: &SqlitePool,
    term: &str,
) -> Result<Vec<User>, sqlx::Error> {
    let term = term.to_lowercase();
    let users = list_users(pool).await?;

    Ok(users
        .into_iter()
        .filter(|user| matches_term(user, &term))
        .collect())
}

fn matches_term(user: &User, folded_term: &str) -> bool {
    user.name.to_lowercase().contains(folded_term)
        || user.email.to_lowercase().contains(folded_term)
}

/// Apply changes to a user, returning the updated record
///
/// Returns `None` when no user has this id.
pub async fn update_user(
    pool: &SqlitePool,
    id: Uuid,
    changes: UserChanges,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        UPDATE users
        SET email = COALESCE(?, email),
            name = COALESCE(?, name),
            password_hash = COALESCE(?, password_hash),
            role = COALESCE(?, role),
            updated_at = ?
        WHERE id = ?
        RETURNING id, email, name, password_hash, role, is_active, is_staff, created_at, updated_at
        "#,
    )
    .bind(changes.email)
    .bind(changes.name)
    .bind(changes.password_hash)
    .bind(changes.role.map(|r| r.as_str()))
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Permanently delete a user; returns false if nothing was deleted
pub async fn delete_user(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
