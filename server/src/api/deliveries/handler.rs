//! Delivery API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::delivery;
use crate::utils::validation::{
    require_text, require_value, MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN,
};
use crate::utils::AppResult;
use shared::models::{Delivery, DeliveryCreate, DeliveryExpanded, DeliveryLine, DeliveryUpdate};
use shared::response::STATUS_SUCCESS;
use shared::ApiResponse;

/// Create payload with hand-validated presence, so a missing field answers
/// `{"status": "error", "message": "Missing required field: ..."}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryRequest {
    pub order_id: Option<i64>,
    pub customer_name: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_date: Option<String>,
    pub status: Option<String>,
    pub delivery_type: Option<String>,
    pub products: Option<Vec<DeliveryLine>>,
}

#[derive(Debug, Serialize)]
pub struct DeliveryCreatedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub delivery_id: i64,
}

/// POST /createDelivery - create a delivery and debit its lines from stock
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> AppResult<(StatusCode, Json<DeliveryCreatedResponse>)> {
    let data = DeliveryCreate {
        order_id: require_value(payload.order_id, "orderId")?,
        customer_name: require_text(payload.customer_name.as_deref(), "customerName", MAX_NAME_LEN)?,
        delivery_address: require_text(
            payload.delivery_address.as_deref(),
            "deliveryAddress",
            MAX_ADDRESS_LEN,
        )?,
        delivery_date: require_text(payload.delivery_date.as_deref(), "deliveryDate", MAX_SHORT_TEXT_LEN)?,
        status: require_text(payload.status.as_deref(), "status", MAX_SHORT_TEXT_LEN)?,
        delivery_type: require_text(payload.delivery_type.as_deref(), "deliveryType", MAX_SHORT_TEXT_LEN)?,
        products: require_value(payload.products, "products")?,
    };

    let delivery_id = delivery::create(state.pool(), data).await?;
    Ok((
        StatusCode::CREATED,
        Json(DeliveryCreatedResponse {
            status: STATUS_SUCCESS,
            message: "Delivery created successfully.",
            delivery_id,
        }),
    ))
}

/// GET /getDeliveries - all deliveries with expanded lines
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<DeliveryExpanded>>>> {
    let deliveries = delivery::find_all_expanded(state.pool()).await?;
    Ok(Json(ApiResponse::ok_data(deliveries)))
}

/// PUT /updateDelivery/{id} - partial update of the header fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DeliveryUpdate>,
) -> AppResult<Json<ApiResponse<Delivery>>> {
    let updated = delivery::update(state.pool(), id, payload).await?;
    Ok(Json(ApiResponse::ok(
        updated,
        "Delivery updated successfully.",
    )))
}

/// DELETE /deleteDelivery/{id} - restore stock, then remove lines + header
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    delivery::delete(state.pool(), id).await?;
    Ok(Json(ApiResponse::ok_empty("Delivery deleted successfully.")))
}
