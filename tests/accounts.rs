//! User accounts, comments and shipping addresses

mod common;

use std::time::Duration;

use common::{seed_goods, seed_user, test_db};
use fleamarket_db::RepoError;
use fleamarket_db::db::{addresses, comments, orders, users};
use fleamarket_db::models::{AddressCreate, SortOrder};

#[tokio::test]
async fn register_then_login_roundtrip() {
    let db = test_db().await;
    let pool = &db.svc.pool;

    assert!(!users::username_taken(pool, "zhang").await.unwrap());
    let id = users::create_user(pool, "zhang", "p@ssw0rd").await.unwrap();
    assert!(users::username_taken(pool, "zhang").await.unwrap());

    assert_eq!(users::authenticate(pool, "zhang", "p@ssw0rd").await.unwrap(), Some(id));
    assert_eq!(users::authenticate(pool, "zhang", "wrong").await.unwrap(), None);
    assert_eq!(users::authenticate(pool, "nobody", "p@ssw0rd").await.unwrap(), None);

    let err = users::create_user(pool, "zhang", "other").await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn profile_counts_finished_sales_on_own_listings() {
    let db = test_db().await;
    let pool = &db.svc.pool;
    let seller = seed_user(pool, "seller").await;
    let buyer = seed_user(pool, "buyer").await;
    let goods_id = seed_goods(pool, seller, "kettle", 18.0).await;

    let order = orders::apply_order(pool, buyer, goods_id).await.unwrap();
    orders::approve_order(pool, seller, goods_id, order).await.unwrap();
    orders::finish_order(pool, buyer, goods_id, order).await.unwrap();

    let seller_profile = users::get_user_profile(pool, seller).await.unwrap().unwrap();
    assert_eq!(seller_profile.username, "seller");
    assert_eq!(seller_profile.sale_count, 1);

    // the purchase counts for the seller, not the buyer
    let buyer_profile = users::get_user_profile(pool, buyer).await.unwrap().unwrap();
    assert_eq!(buyer_profile.sale_count, 0);

    assert!(users::get_user_profile(pool, 999_999).await.unwrap().is_none());
}

#[tokio::test]
async fn comments_are_author_scoped_and_time_ordered() {
    let db = test_db().await;
    let pool = &db.svc.pool;
    let seller = seed_user(pool, "seller").await;
    let alice = seed_user(pool, "alice").await;
    let bob = seed_user(pool, "bob").await;
    let goods_id = seed_goods(pool, seller, "teapot", 22.0).await;

    let first = comments::create_comment(pool, alice, goods_id, "still available?")
        .await
        .unwrap();
    // comment timestamps are millisecond-granular
    tokio::time::sleep(Duration::from_millis(5)).await;
    comments::create_comment(pool, bob, goods_id, "any scratches?")
        .await
        .unwrap();

    let asc = comments::get_comments(pool, goods_id, SortOrder::Asc).await.unwrap();
    assert_eq!(asc.len(), 2);
    assert_eq!(asc[0].username, "alice");
    assert_eq!(asc[0].content, "still available?");
    assert!(!asc[0].created_at.is_empty());

    let desc = comments::get_comments(pool, goods_id, SortOrder::Desc).await.unwrap();
    assert_eq!(desc[0].username, "bob");

    // bob cannot delete alice's comment
    assert!(!comments::delete_comment(pool, bob, goods_id, first).await.unwrap());
    assert!(comments::delete_comment(pool, alice, goods_id, first).await.unwrap());

    let rest = comments::get_comments(pool, goods_id, SortOrder::Asc).await.unwrap();
    assert_eq!(rest.len(), 1);
}

#[tokio::test]
async fn address_book_is_owner_scoped() {
    let db = test_db().await;
    let pool = &db.svc.pool;
    let alice = seed_user(pool, "alice").await;
    let bob = seed_user(pool, "bob").await;

    let addr = addresses::create_address(
        pool,
        alice,
        AddressCreate {
            name: "Alice".into(),
            phone: "13500000000".into(),
            location: "3 Elm St".into(),
        },
    )
    .await
    .unwrap();

    let list = addresses::get_address_list(pool, alice).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].phone, "13500000000");
    assert!(addresses::get_address_list(pool, bob).await.unwrap().is_empty());

    assert!(!addresses::delete_address(pool, bob, addr).await.unwrap());
    assert!(addresses::delete_address(pool, alice, addr).await.unwrap());
    assert!(addresses::get_address_list(pool, alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn address_bound_to_an_order_cannot_be_deleted() {
    let db = test_db().await;
    let pool = &db.svc.pool;
    let seller = seed_user(pool, "seller").await;
    let buyer = seed_user(pool, "buyer").await;
    let goods_id = seed_goods(pool, seller, "scarf", 8.0).await;

    let order = orders::apply_order(pool, buyer, goods_id).await.unwrap();
    orders::approve_order(pool, seller, goods_id, order).await.unwrap();

    let addr = addresses::create_address(
        pool,
        buyer,
        AddressCreate {
            name: "Buyer".into(),
            phone: "13400000000".into(),
            location: "5 Birch Ln".into(),
        },
    )
    .await
    .unwrap();
    orders::establish_order(pool, buyer, goods_id, order, addr)
        .await
        .unwrap();

    // foreign key keeps the shipping record intact
    let err = addresses::delete_address(pool, buyer, addr).await.unwrap_err();
    assert!(matches!(err, RepoError::Database(_)));
}
