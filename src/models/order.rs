//! Order Models
//!
//! The order state machine: `Applied → Approved → Established → OnRoad
//! → Finished`, with `OffSale` as the absorbing state for losing
//! applicants. State codes 1..6 are fixed on the wire and in storage;
//! the enum is only the in-process face of those integers.

use serde::{Deserialize, Serialize};

/// Order lifecycle state.
///
/// `OffSale` is reached from `Applied` as a side effect of a sibling
/// order's approval, and reverts to `Applied` when the winning order
/// is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum OrderState {
    Applied = 1,
    Approved = 2,
    Established = 3,
    OnRoad = 4,
    Finished = 5,
    OffSale = 6,
}

impl OrderState {
    /// Wire/storage code (1..6)
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Fixed human-readable label (买家视角)
    pub fn label(self) -> &'static str {
        match self {
            OrderState::Applied => "待同意",
            OrderState::Approved => "待补充信息",
            OrderState::Established => "待发货",
            OrderState::OnRoad => "待收货",
            OrderState::Finished => "已完成",
            OrderState::OffSale => "被买走",
        }
    }
}

impl From<OrderState> for i32 {
    fn from(state: OrderState) -> i32 {
        state as i32
    }
}

impl TryFrom<i32> for OrderState {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(OrderState::Applied),
            2 => Ok(OrderState::Approved),
            3 => Ok(OrderState::Established),
            4 => Ok(OrderState::OnRoad),
            5 => Ok(OrderState::Finished),
            6 => Ok(OrderState::OffSale),
            other => Err(format!("Invalid order state code: {other}")),
        }
    }
}

/// Order entity, one row per (customer, listing) claim
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub goods_id: i64,
    pub state: OrderState,
    pub address_id: Option<i64>,
    pub express_code: Option<String>,
    pub express_company: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Minimal order view for "has this user already applied?" checks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderBrief {
    pub id: i64,
    pub state: OrderState,
}

/// Order a user placed, joined with its listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlacedOrder {
    pub id: i64,
    pub goods_id: i64,
    pub name: String,
    pub state: OrderState,
    pub price: f64,
    pub exempt_postage: bool,
    pub express_code: Option<String>,
    pub express_company: Option<String>,
}

/// Order received on one of a user's listings, joined with the
/// applicant and their chosen shipping address (absent until the order
/// is established)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReceivedOrder {
    pub id: i64,
    pub user_id: i64,
    pub goods_id: i64,
    pub name: String,
    pub state: OrderState,
    pub price: f64,
    pub exempt_postage: bool,
    pub username: String,
    pub address_name: Option<String>,
    pub address_phone: Option<String>,
    pub address_location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_codes_are_stable() {
        assert_eq!(OrderState::Applied.code(), 1);
        assert_eq!(OrderState::Approved.code(), 2);
        assert_eq!(OrderState::Established.code(), 3);
        assert_eq!(OrderState::OnRoad.code(), 4);
        assert_eq!(OrderState::Finished.code(), 5);
        assert_eq!(OrderState::OffSale.code(), 6);
    }

    #[test]
    fn lifecycle_codes_are_totally_ordered() {
        let lifecycle = [
            OrderState::Applied,
            OrderState::Approved,
            OrderState::Established,
            OrderState::OnRoad,
            OrderState::Finished,
        ];
        for pair in lifecycle.windows(2) {
            assert!(pair[0].code() < pair[1].code());
        }
    }

    #[test]
    fn serde_uses_integer_codes() {
        assert_eq!(serde_json::to_string(&OrderState::Applied).unwrap(), "1");
        assert_eq!(serde_json::to_string(&OrderState::OffSale).unwrap(), "6");
        let state: OrderState = serde_json::from_str("4").unwrap();
        assert_eq!(state, OrderState::OnRoad);
        assert!(serde_json::from_str::<OrderState>("7").is_err());
        assert!(serde_json::from_str::<OrderState>("0").is_err());
    }

    #[test]
    fn every_state_has_a_label() {
        for code in 1..=6 {
            let state = OrderState::try_from(code).unwrap();
            assert!(!state.label().is_empty());
        }
    }
}
