//! Shared fixtures for integration tests

#![allow(dead_code)]

use fleamarket_db::db::{self, DbService};
use fleamarket_db::models::{GoodsCreate, OrderState};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestDb {
    // Keeps the directory alive for the lifetime of the pool
    pub _dir: TempDir,
    pub svc: DbService,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("market.db");
    let svc = DbService::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("open test database");
    TestDb { _dir: dir, svc }
}

pub async fn seed_user(pool: &SqlitePool, username: &str) -> i64 {
    db::users::create_user(pool, username, "hunter2")
        .await
        .expect("seed user")
}

pub async fn seed_goods(pool: &SqlitePool, owner: i64, name: &str, price: f64) -> i64 {
    db::goods::create_goods(
        pool,
        owner,
        GoodsCreate {
            name: name.into(),
            description: format!("{name} in good condition"),
            img: None,
            price,
            exempt_postage: false,
        },
    )
    .await
    .expect("seed goods")
}

pub async fn order_state(pool: &SqlitePool, order_id: i64) -> OrderState {
    let (state,): (OrderState,) = sqlx::query_as("SELECT state FROM orders WHERE id = ?")
        .bind(order_id)
        .fetch_one(pool)
        .await
        .expect("order exists");
    state
}
