//! Product (stock line) model

use serde::{Deserialize, Serialize};

/// Stock line entity
///
/// `total_amount` is a cached derivation (`qty_purchased * unit_price`) and
/// `status` is always the threshold function of `qty_purchased`; both are
/// recomputed by the repository on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub qty_purchased: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub supplier: String,
    pub status: String,
    pub image: Option<String>,
    /// Epoch millis, refreshed on every mutation
    pub last_updated: i64,
}

/// Create (or merge) product payload
///
/// Purchases of an existing `(product_name, category, supplier)` triple are
/// merged into the existing line via weighted averaging instead of creating
/// a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub product_name: String,
    pub category: String,
    pub qty_purchased: i64,
    pub unit_price: f64,
    pub supplier: String,
    pub image: Option<String>,
}

/// Update product payload (full field set)
///
/// `status` is accepted for wire compatibility but ignored: the stored
/// status is always derived from the new quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub qty_purchased: i64,
    pub unit_price: f64,
    pub supplier: String,
    pub status: Option<String>,
    pub image: Option<String>,
}
