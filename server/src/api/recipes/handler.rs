//! Recipe API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::recipe;
use crate::utils::validation::{require_text, require_value, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};
use crate::utils::AppResult;
use shared::models::{RecipeCreate, RecipeExpanded, RecipeIngredientInput};
use shared::response::STATUS_SUCCESS;
use shared::ApiResponse;

/// Add-recipe payload with hand-validated presence
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRecipeRequest {
    pub name: Option<String>,
    pub product_name: Option<String>,
    #[serde(rename = "type")]
    pub recipe_type: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<i64>,
    pub ingredients: Option<Vec<RecipeIngredientInput>>,
}

#[derive(Debug, Serialize)]
pub struct RecipeCreatedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub recipe_id: i64,
}

/// POST /addRecipe - store a recipe with its ingredient list and create
/// the produced good's zero-quantity stock placeholder
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AddRecipeRequest>,
) -> AppResult<(StatusCode, Json<RecipeCreatedResponse>)> {
    let data = RecipeCreate {
        name: require_text(payload.name.as_deref(), "name", MAX_NAME_LEN)?,
        product_name: require_text(payload.product_name.as_deref(), "productName", MAX_NAME_LEN)?,
        recipe_type: require_text(payload.recipe_type.as_deref(), "type", MAX_SHORT_TEXT_LEN)?,
        category: payload.category,
        created_by: payload.created_by,
        ingredients: require_value(payload.ingredients, "ingredients")?,
    };

    let recipe_id = recipe::create(state.pool(), data).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeCreatedResponse {
            status: STATUS_SUCCESS,
            message: "Recipe added successfully.",
            recipe_id,
        }),
    ))
}

/// GET /getRecipes - all recipes with live-priced ingredients
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<ApiResponse<Vec<RecipeExpanded>>>> {
    let recipes = recipe::find_all_expanded(state.pool()).await?;
    Ok(Json(ApiResponse::ok_data(recipes)))
}

/// DELETE /deleteRecipe/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<()>>> {
    recipe::delete(state.pool(), id).await?;
    Ok(Json(ApiResponse::ok_empty("Recipe deleted successfully.")))
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UseRecipeRequest {
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct RecipeUsedResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub product_id: i64,
}

/// POST /useRecipe/{id} - debit ingredient stock and credit the produced
/// good's line
pub async fn use_recipe(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UseRecipeRequest>,
) -> AppResult<Json<RecipeUsedResponse>> {
    let product_id = recipe::use_recipe(state.pool(), id, payload.quantity).await?;
    Ok(Json(RecipeUsedResponse {
        status: STATUS_SUCCESS,
        message: "Recipe used successfully, product created.",
        product_id,
    }))
}
