//! Data-access layer for a secondhand-goods marketplace.
//!
//! Flat, parameterized SQL over a SQLite pool: user accounts, goods
//! listings, the order lifecycle, comments and shipping addresses.
//! The only cross-row logic lives in [`db::orders`] — approving or
//! abandoning an order must keep every sibling order on the same
//! listing consistent, so those two operations run in transactions.
//!
//! No HTTP surface here; a presentation layer maps the returned
//! records and booleans to whatever protocol it speaks.

pub mod config;
pub mod db;
pub mod logger;
pub mod models;
pub mod util;

pub use config::Config;
pub use db::{DbService, RepoError, RepoResult};
