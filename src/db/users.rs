//! User queries: registration, login, seller profile

use super::{RepoError, RepoResult};
use crate::models::{OrderState, UserProfile};
use crate::util;
use sqlx::SqlitePool;

/// Check whether a username is already registered
pub async fn username_taken(pool: &SqlitePool, username: &str) -> RepoResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Register a user. The password is argon2-hashed before storage; a
/// taken username surfaces as [`RepoError::Duplicate`].
pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> RepoResult<i64> {
    let hashed = util::hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    let now = util::now_millis();
    let result =
        sqlx::query("INSERT INTO users (username, hashed_password, created_at) VALUES (?, ?, ?)")
            .bind(username)
            .bind(&hashed)
            .bind(now)
            .execute(pool)
            .await?;
    tracing::info!(username, "User registered");
    Ok(result.last_insert_rowid())
}

/// Verify credentials and return the user id. Unknown username and bad
/// password are indistinguishable to the caller.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> RepoResult<Option<i64>> {
    let row: Option<(i64, String)> =
        sqlx::query_as("SELECT id, hashed_password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

    let Some((id, hashed)) = row else {
        return Ok(None);
    };

    if util::verify_password(password, &hashed) {
        Ok(Some(id))
    } else {
        tracing::debug!(username, "Password verification failed");
        Ok(None)
    }
}

/// Seller summary for the goods detail page: username plus the number
/// of finished orders on listings the user owns.
pub async fn get_user_profile(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<UserProfile>> {
    let profile: Option<UserProfile> = sqlx::query_as(
        "SELECT u.username, \
         (SELECT COUNT(*) FROM orders o JOIN goods g ON o.goods_id = g.id \
          WHERE g.owner = u.id AND o.state = ?) AS sale_count \
         FROM users u WHERE u.id = ?",
    )
    .bind(OrderState::Finished)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(profile)
}
