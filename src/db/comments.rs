//! Comment queries

use super::RepoResult;
use crate::models::{CommentView, SortOrder};
use crate::util;
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    user_id: i64,
    username: String,
    content: String,
    created_at: i64,
}

/// Add a comment to a goods detail page
pub async fn create_comment(
    pool: &SqlitePool,
    user_id: i64,
    goods_id: i64,
    content: &str,
) -> RepoResult<i64> {
    let now = util::now_millis();
    let result = sqlx::query(
        "INSERT INTO comments (user_id, goods_id, content, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(goods_id)
    .bind(content)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Comments on a listing, joined with author usernames, ordered by
/// creation time.
pub async fn get_comments(
    pool: &SqlitePool,
    goods_id: i64,
    order: SortOrder,
) -> RepoResult<Vec<CommentView>> {
    let sql = format!(
        "SELECT c.id, c.user_id, u.username, c.content, c.created_at \
         FROM comments c JOIN users u ON c.user_id = u.id \
         WHERE c.goods_id = ? ORDER BY c.created_at {}",
        order.as_sql()
    );
    let rows: Vec<CommentRow> = sqlx::query_as(&sql).bind(goods_id).fetch_all(pool).await?;
    Ok(rows
        .into_iter()
        .map(|r| CommentView {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            content: r.content,
            created_at: format_millis(r.created_at),
        })
        .collect())
}

/// Delete a comment. Author-scoped: users can only remove their own.
pub async fn delete_comment(
    pool: &SqlitePool,
    user_id: i64,
    goods_id: i64,
    comment_id: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM comments WHERE id = ? AND user_id = ? AND goods_id = ?")
        .bind(comment_id)
        .bind(user_id)
        .bind(goods_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

fn format_millis(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_format_is_display_ready() {
        assert_eq!(format_millis(0), "1970-01-01 00:00:00");
        assert_eq!(format_millis(1_700_000_000_000), "2023-11-14 22:13:20");
    }
}
