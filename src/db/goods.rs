//! Goods queries
//!
//! Listing availability is never stored: a listing is available iff it
//! has zero orders or every order is still applied, and it is sold out
//! iff at least one order has progressed past applied. Both list and
//! detail queries recompute this from the order set, because a
//! withdrawal can flip a sold-out listing back to available.

use super::RepoResult;
use crate::models::{
    AvailabilityFilter, GoodsCreate, GoodsDetail, GoodsFilter, GoodsSummary, GoodsUpdate,
    OrderState, PriceSort,
};
use crate::util;
use sqlx::SqlitePool;

const GOODS_SELECT: &str =
    "SELECT id, owner, name, description, img, price, exempt_postage FROM goods";

/// Publish a listing
pub async fn create_goods(pool: &SqlitePool, owner: i64, data: GoodsCreate) -> RepoResult<i64> {
    let now = util::now_millis();
    let result = sqlx::query(
        "INSERT INTO goods (owner, name, description, img, price, exempt_postage, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(owner)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.img)
    .bind(data.price)
    .bind(data.exempt_postage)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    tracing::info!(owner, goods_id = result.last_insert_rowid(), "Goods published");
    Ok(result.last_insert_rowid())
}

/// Update a listing. Owner-scoped; `None` fields keep their current
/// value, so an absent `img` means "no new image uploaded".
pub async fn update_goods(
    pool: &SqlitePool,
    owner: i64,
    goods_id: i64,
    data: GoodsUpdate,
) -> RepoResult<bool> {
    let now = util::now_millis();
    let rows = sqlx::query(
        "UPDATE goods SET \
         name = COALESCE(?, name), \
         description = COALESCE(?, description), \
         img = COALESCE(?, img), \
         price = COALESCE(?, price), \
         exempt_postage = COALESCE(?, exempt_postage), \
         updated_at = ? \
         WHERE id = ? AND owner = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.img)
    .bind(data.price)
    .bind(data.exempt_postage)
    .bind(now)
    .bind(goods_id)
    .bind(owner)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Trading-hall listing query: keyword search, availability and
/// postage filters, price sort.
pub async fn get_goods_list(
    pool: &SqlitePool,
    filter: &GoodsFilter,
) -> RepoResult<Vec<GoodsSummary>> {
    let key = filter.key.as_deref().filter(|k| !k.is_empty());

    let mut clauses: Vec<&str> = Vec::new();
    match filter.availability {
        AvailabilityFilter::All => {}
        AvailabilityFilter::Available => clauses.push(
            "NOT EXISTS (SELECT 1 FROM orders o WHERE o.goods_id = goods.id AND o.state <> ?)",
        ),
        AvailabilityFilter::Sold => clauses
            .push("EXISTS (SELECT 1 FROM orders o WHERE o.goods_id = goods.id AND o.state <> ?)"),
    }
    if key.is_some() {
        clauses.push("(name LIKE ? OR description LIKE ?)");
    }
    if filter.exempt_postage.is_some() {
        clauses.push("exempt_postage = ?");
    }

    let mut sql = String::from(GOODS_SELECT);
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(match filter.price_sort {
        PriceSort::Asc => " ORDER BY price ASC",
        PriceSort::Desc => " ORDER BY price DESC",
    });

    let mut query = sqlx::query_as::<_, GoodsSummary>(&sql);
    if filter.availability != AvailabilityFilter::All {
        query = query.bind(OrderState::Applied);
    }
    if let Some(key) = key {
        let pattern = format!("%{key}%");
        query = query.bind(pattern.clone()).bind(pattern);
    }
    if let Some(exempt) = filter.exempt_postage {
        query = query.bind(exempt);
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

/// Listings published by one user, for the management page
pub async fn get_goods_list_of_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Vec<GoodsSummary>> {
    let sql = format!("{GOODS_SELECT} WHERE owner = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, GoodsSummary>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Delete a listing. Refused while any order on it has progressed past
/// applied; still-applied orders go away with the listing via the FK
/// cascade.
pub async fn delete_goods(pool: &SqlitePool, owner: i64, goods_id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    let in_flight: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM orders WHERE goods_id = ? AND state <> ? LIMIT 1")
            .bind(goods_id)
            .bind(OrderState::Applied)
            .fetch_optional(&mut *tx)
            .await?;
    if in_flight.is_some() {
        tracing::warn!(owner, goods_id, "Refusing to delete goods with an in-flight order");
        return Ok(false);
    }

    let rows = sqlx::query("DELETE FROM goods WHERE id = ? AND owner = ?")
        .bind(goods_id)
        .bind(owner)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

/// Goods detail with the derived fields the detail page needs
pub async fn get_goods_detail(pool: &SqlitePool, goods_id: i64) -> RepoResult<Option<GoodsDetail>> {
    let detail: Option<GoodsDetail> = sqlx::query_as(
        "SELECT id, owner, name, description, img, price, exempt_postage, \
         (SELECT COUNT(*) FROM orders o WHERE o.goods_id = goods.id AND o.state = ?) AS apply_count, \
         EXISTS (SELECT 1 FROM orders o WHERE o.goods_id = goods.id AND o.state <> ?) AS off_sale \
         FROM goods WHERE id = ?",
    )
    .bind(OrderState::Applied)
    .bind(OrderState::Applied)
    .bind(goods_id)
    .fetch_optional(pool)
    .await?;
    Ok(detail)
}
