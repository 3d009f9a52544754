//! Order lifecycle queries
//!
//! The six-state machine lives here. Two operations cross-mutate
//! sibling rows and therefore run inside a transaction so the primary
//! mutation and the sibling sweep land together or not at all:
//!
//! - `approve_order`: winner to approved, every sibling to off-sale
//! - `abandon_order`: delete the row, off-sale siblings back to applied
//!
//! Every conditional mutation reports `Ok(true)` when its guarded
//! statement matched a row and `Ok(false)` otherwise; `Err` is reserved
//! for infrastructure failures.

use super::RepoResult;
use crate::models::{OrderBrief, OrderState, PlacedOrder, ReceivedOrder};
use crate::util;
use sqlx::SqlitePool;

/// Customer applies to buy ("想要"). One row per (customer, listing),
/// enforced by the unique index; a second apply surfaces as
/// [`super::RepoError::Duplicate`].
pub async fn apply_order(pool: &SqlitePool, customer: i64, goods_id: i64) -> RepoResult<i64> {
    let now = util::now_millis();
    let result = sqlx::query(
        "INSERT INTO orders (user_id, goods_id, state, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(customer)
    .bind(goods_id)
    .bind(OrderState::Applied)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Customer withdraws their claim, deleting the order row. Removing
/// the winning order re-opens the listing: every sibling parked in
/// off-sale drops back to applied in the same transaction.
pub async fn abandon_order(pool: &SqlitePool, customer: i64, goods_id: i64) -> RepoResult<bool> {
    let now = util::now_millis();
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM orders WHERE user_id = ? AND goods_id = ?")
        .bind(customer)
        .bind(goods_id)
        .execute(&mut *tx)
        .await?;
    if deleted.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("UPDATE orders SET state = ?, updated_at = ? WHERE goods_id = ? AND state = ?")
        .bind(OrderState::Applied)
        .bind(now)
        .bind(goods_id)
        .bind(OrderState::OffSale)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::debug!(customer, goods_id, "Order abandoned, off-sale siblings restored");
    Ok(true)
}

/// Owner accepts one applicant. The target must still be in applied
/// state — that guard is what serializes two racing approvals: the
/// second one matches zero rows and reports `Ok(false)`. Every sibling
/// order on the listing is swept to off-sale in the same transaction.
pub async fn approve_order(
    pool: &SqlitePool,
    owner: i64,
    goods_id: i64,
    order_id: i64,
) -> RepoResult<bool> {
    let now = util::now_millis();
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        "UPDATE orders SET state = ?, updated_at = ? \
         WHERE id = ? AND goods_id = ? AND state = ? \
         AND goods_id IN (SELECT id FROM goods WHERE owner = ?)",
    )
    .bind(OrderState::Approved)
    .bind(now)
    .bind(order_id)
    .bind(goods_id)
    .bind(OrderState::Applied)
    .bind(owner)
    .execute(&mut *tx)
    .await?;
    if updated.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("UPDATE orders SET state = ?, updated_at = ? WHERE goods_id = ? AND id <> ?")
        .bind(OrderState::OffSale)
        .bind(now)
        .bind(goods_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::debug!(owner, goods_id, order_id, "Order approved, siblings swept to off-sale");
    Ok(true)
}

/// Customer confirms the purchase and attaches a shipping address.
/// Only valid on their own approved order.
pub async fn establish_order(
    pool: &SqlitePool,
    customer: i64,
    goods_id: i64,
    order_id: i64,
    address_id: i64,
) -> RepoResult<bool> {
    let now = util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET state = ?, address_id = ?, updated_at = ? \
         WHERE id = ? AND user_id = ? AND goods_id = ? AND state = ?",
    )
    .bind(OrderState::Established)
    .bind(address_id)
    .bind(now)
    .bind(order_id)
    .bind(customer)
    .bind(goods_id)
    .bind(OrderState::Approved)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Owner hands the item to a carrier and records the tracking details.
/// Only valid on an established order on the owner's own listing.
pub async fn ship_order(
    pool: &SqlitePool,
    owner: i64,
    goods_id: i64,
    order_id: i64,
    express_code: &str,
    express_company: &str,
) -> RepoResult<bool> {
    let now = util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET state = ?, express_code = ?, express_company = ?, updated_at = ? \
         WHERE id = ? AND goods_id = ? AND state = ? \
         AND goods_id IN (SELECT id FROM goods WHERE owner = ?)",
    )
    .bind(OrderState::OnRoad)
    .bind(express_code)
    .bind(express_company)
    .bind(now)
    .bind(order_id)
    .bind(goods_id)
    .bind(OrderState::Established)
    .bind(owner)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Customer confirms receipt. State is deliberately not part of the
/// guard; only the (id, customer, listing) binding is checked.
pub async fn finish_order(
    pool: &SqlitePool,
    customer: i64,
    goods_id: i64,
    order_id: i64,
) -> RepoResult<bool> {
    let now = util::now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET state = ?, updated_at = ? \
         WHERE id = ? AND user_id = ? AND goods_id = ?",
    )
    .bind(OrderState::Finished)
    .bind(now)
    .bind(order_id)
    .bind(customer)
    .bind(goods_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Has this user already applied for this listing?
pub async fn find_by_user_and_goods(
    pool: &SqlitePool,
    user_id: i64,
    goods_id: i64,
) -> RepoResult<Option<OrderBrief>> {
    let order: Option<OrderBrief> =
        sqlx::query_as("SELECT id, state FROM orders WHERE user_id = ? AND goods_id = ?")
            .bind(user_id)
            .bind(goods_id)
            .fetch_optional(pool)
            .await?;
    Ok(order)
}

/// Orders a user placed, joined with their listings. Empty vec for a
/// user with no orders.
pub async fn get_orders_from_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<PlacedOrder>> {
    let rows: Vec<PlacedOrder> = sqlx::query_as(
        "SELECT o.id, o.goods_id, g.name, o.state, g.price, g.exempt_postage, \
         o.express_code, o.express_company \
         FROM orders o JOIN goods g ON o.goods_id = g.id \
         WHERE o.user_id = ? ORDER BY o.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Orders received on a user's listings, joined with the applicant and
/// the shipping address (absent until established).
pub async fn get_orders_to_user(pool: &SqlitePool, owner: i64) -> RepoResult<Vec<ReceivedOrder>> {
    let rows: Vec<ReceivedOrder> = sqlx::query_as(
        "SELECT o.id, o.user_id, o.goods_id, g.name, o.state, g.price, g.exempt_postage, \
         u.username, a.name AS address_name, a.phone AS address_phone, \
         a.location AS address_location \
         FROM orders o \
         JOIN goods g ON o.goods_id = g.id \
         JOIN users u ON o.user_id = u.id \
         LEFT JOIN addresses a ON o.address_id = a.id \
         WHERE g.owner = ? ORDER BY o.created_at DESC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
