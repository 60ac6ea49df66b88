//! Delivery model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Delivery header entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Delivery {
    pub delivery_id: i64,
    pub order_id: i64,
    pub customer_name: String,
    pub delivery_address: String,
    pub delivery_date: NaiveDate,
    pub status: String,
    pub delivery_type: String,
    /// Epoch millis
    pub created_at: i64,
}

/// One requested line on a delivery: product id + quantity to ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryLine {
    pub id: i64,
    pub quantity: i64,
}

/// Create delivery payload
///
/// `delivery_date` arrives as ISO `YYYY-MM-DD` and is parsed before any
/// write happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCreate {
    pub order_id: i64,
    pub customer_name: String,
    pub delivery_address: String,
    pub delivery_date: String,
    pub status: String,
    pub delivery_type: String,
    pub products: Vec<DeliveryLine>,
}

/// Update delivery payload — header fields only, lines and stock untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryUpdate {
    pub customer_name: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<String>,
    pub status: Option<String>,
    pub delivery_type: Option<String>,
}

/// Expanded line for the read path (product name resolved)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeliveryLineExpanded {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
}

/// Delivery with expanded lines, as served by `/getDeliveries`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryExpanded {
    pub delivery_id: i64,
    pub order_id: i64,
    pub customer_name: String,
    pub delivery_address: String,
    pub delivery_date: String,
    pub status: String,
    pub delivery_type: String,
    pub products: Vec<DeliveryLineExpanded>,
}
