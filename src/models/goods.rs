//! Goods Models

use serde::{Deserialize, Serialize};

/// Goods entity (二手商品)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Goods {
    pub id: i64,
    pub owner: i64,
    pub name: String,
    pub description: String,
    pub img: Option<String>,
    pub price: f64,
    pub exempt_postage: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create goods payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsCreate {
    pub name: String,
    pub description: String,
    pub img: Option<String>,
    pub price: f64,
    pub exempt_postage: bool,
}

/// Update goods payload — `None` fields leave the column untouched.
/// Covers the "no new image uploaded" case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoodsUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub price: Option<f64>,
    pub exempt_postage: Option<bool>,
}

/// Goods row for list views
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GoodsSummary {
    pub id: i64,
    pub owner: i64,
    pub name: String,
    pub description: String,
    pub img: Option<String>,
    pub price: f64,
    pub exempt_postage: bool,
}

/// Goods detail view with derived order-driven fields.
///
/// `off_sale` is recomputed from the order set on every read — a
/// withdrawal can flip a sold-out listing back to available, so the
/// flag is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GoodsDetail {
    pub id: i64,
    pub owner: i64,
    pub name: String,
    pub description: String,
    pub img: Option<String>,
    pub price: f64,
    pub exempt_postage: bool,
    /// Number of orders still in the applied state
    pub apply_count: i64,
    /// True iff at least one order has progressed past applied
    pub off_sale: bool,
}

/// Availability filter for the trading-hall listing query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvailabilityFilter {
    #[default]
    All,
    /// Zero orders, or every order still applied
    Available,
    /// At least one order past applied
    Sold,
}

/// Price sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSort {
    #[default]
    Asc,
    Desc,
}

/// Goods list query parameters
#[derive(Debug, Clone, Default)]
pub struct GoodsFilter {
    /// Keyword matched against name and description; empty means no filter
    pub key: Option<String>,
    /// Postage-exemption filter; `None` means no filter
    pub exempt_postage: Option<bool>,
    pub availability: AvailabilityFilter,
    pub price_sort: PriceSort,
}
