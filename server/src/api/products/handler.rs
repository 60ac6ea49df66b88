//! Product API handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::utils::validation::{
    require_non_negative, require_text, require_value, validate_optional_text, MAX_NAME_LEN,
    MAX_URL_LEN,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::{format_money, format_money_grouped};
use shared::ApiResponse;

const DEFAULT_PER_PAGE: u32 = 50;
const DEFAULT_IMAGE: &str = "src/assets/images/default.png";

/// Create/merge payload; presence is validated by hand so missing fields
/// answer with the standard envelope instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub qty_purchased: Option<i64>,
    pub unit_price: Option<f64>,
    pub supplier: Option<String>,
    pub image: Option<String>,
}

/// POST /createProduct - create a stock line, or merge a repeat purchase
/// of the same (name, category, supplier) into the existing line
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let unit_price = require_value(payload.unit_price, "unit_price")?;
    if unit_price < 0.0 {
        return Err(AppError::validation("unit_price must not be negative"));
    }

    let data = ProductCreate {
        product_name: require_text(payload.product_name.as_deref(), "product_name", MAX_NAME_LEN)?,
        category: require_text(payload.category.as_deref(), "category", MAX_NAME_LEN)?,
        qty_purchased: require_non_negative(
            require_value(payload.qty_purchased, "qty_purchased")?,
            "qty_purchased",
        )?,
        unit_price,
        supplier: require_text(payload.supplier.as_deref(), "supplier", MAX_NAME_LEN)?,
        image: payload.image,
    };
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;

    let product = product::create_or_merge(state.pool(), data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(product, "Product created successfully")),
    ))
}

/// PUT /updateProduct - full-field overwrite; total and status recomputed
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiResponse<Product>>> {
    if payload.unit_price < 0.0 {
        return Err(AppError::validation("unit_price must not be negative"));
    }
    require_non_negative(payload.qty_purchased, "qty_purchased")?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let product = product::update(state.pool(), payload).await?;
    Ok(Json(ApiResponse::ok(
        product,
        "Product updated successfully",
    )))
}

#[derive(Debug, Deserialize)]
pub struct DeleteProductRequest {
    pub product_id: i64,
}

/// DELETE /deleteProduct - remove a stock line unconditionally
pub async fn delete(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteProductRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    product::delete(state.pool(), payload.product_id).await?;
    Ok(Json(ApiResponse::ok_empty("Product deleted successfully")))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Stock line shaped for the inventory table view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedProduct {
    pub id: String,
    pub image: String,
    pub product_name: String,
    /// Display tag, e.g. "ST-FLO-007"
    pub product_id: String,
    pub category: String,
    pub qty_purchased: String,
    pub unit_price: String,
    pub total_amount: String,
    pub supplier: String,
    pub status: String,
}

fn format_product(p: Product) -> FormattedProduct {
    let prefix: String = p.product_name.chars().take(3).collect::<String>().to_uppercase();
    FormattedProduct {
        id: format!("{:02}", p.product_id),
        image: p.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        product_id: format!("ST-{}-{:03}", prefix, p.product_id),
        product_name: p.product_name,
        category: p.category,
        qty_purchased: format!("{} pcs", p.qty_purchased),
        unit_price: format_money(p.unit_price),
        total_amount: format_money_grouped(p.total_amount),
        supplier: p.supplier,
        status: p.status,
    }
}

/// GET /getProduct - list stock lines, optionally paged
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<FormattedProduct>>> {
    let products = if query.page.is_some() || query.per_page.is_some() {
        product::find_page(
            state.pool(),
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
        .await?
    } else {
        product::find_all(state.pool()).await?
    };

    Ok(Json(products.into_iter().map(format_product).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            product_id: 7,
            product_name: "Flour".to_string(),
            category: "Raw Material".to_string(),
            qty_purchased: 30,
            unit_price: 2.5,
            total_amount: 1234.5,
            supplier: "Acme".to_string(),
            status: "Available".to_string(),
            image: None,
            last_updated: 0,
        }
    }

    #[test]
    fn formatted_read_model() {
        let f = format_product(sample_product());
        assert_eq!(f.id, "07");
        assert_eq!(f.product_id, "ST-FLO-007");
        assert_eq!(f.qty_purchased, "30 pcs");
        assert_eq!(f.unit_price, "2.50");
        assert_eq!(f.total_amount, "1,234.50");
        assert_eq!(f.image, DEFAULT_IMAGE);
    }

    #[test]
    fn short_names_keep_short_prefix() {
        let mut p = sample_product();
        p.product_name = "Ry".to_string();
        let f = format_product(p);
        assert_eq!(f.product_id, "ST-RY-007");
    }
}
