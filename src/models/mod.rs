//! Database Models

pub mod address;
pub mod comment;
pub mod goods;
pub mod order;
pub mod user;

// Re-exports
pub use address::{Address, AddressCreate};
pub use comment::{CommentView, SortOrder};
pub use goods::{
    AvailabilityFilter, Goods, GoodsCreate, GoodsDetail, GoodsFilter, GoodsSummary, GoodsUpdate,
    PriceSort,
};
pub use order::{Order, OrderBrief, OrderState, PlacedOrder, ReceivedOrder};
pub use user::UserProfile;
