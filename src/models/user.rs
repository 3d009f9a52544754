//! User Models

use serde::{Deserialize, Serialize};

/// Seller summary shown on a goods detail page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub username: String,
    /// Finished orders on listings this user owns
    pub sale_count: i64,
}
