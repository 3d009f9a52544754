//! Address Models

use serde::{Deserialize, Serialize};

/// Shipping address entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: i64,
    /// Recipient name
    pub name: String,
    pub phone: String,
    pub location: String,
}

/// Create address payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressCreate {
    pub name: String,
    pub phone: String,
    pub location: String,
}
