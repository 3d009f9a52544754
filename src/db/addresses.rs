//! Shipping address queries

use super::RepoResult;
use crate::models::{Address, AddressCreate};
use sqlx::SqlitePool;

/// Add a shipping address for a user
pub async fn create_address(
    pool: &SqlitePool,
    user_id: i64,
    data: AddressCreate,
) -> RepoResult<i64> {
    let result =
        sqlx::query("INSERT INTO addresses (user_id, name, phone, location) VALUES (?, ?, ?, ?)")
            .bind(user_id)
            .bind(&data.name)
            .bind(&data.phone)
            .bind(&data.location)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

/// All shipping addresses of a user
pub async fn get_address_list(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Address>> {
    let rows: Vec<Address> =
        sqlx::query_as("SELECT id, name, phone, location FROM addresses WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Delete a shipping address. Owner-scoped: users can only remove
/// their own.
pub async fn delete_address(pool: &SqlitePool, user_id: i64, address_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM addresses WHERE id = ? AND user_id = ?")
        .bind(address_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
