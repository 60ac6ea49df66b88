//! Recipe model

use serde::{Deserialize, Serialize};

/// Recipe entity
///
/// `total_price` is the add-time estimate (sum of frozen ingredient
/// prices); live valuations are recomputed from current stock prices on
/// the read path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub recipe_id: i64,
    pub name: String,
    /// Name of the produced good
    pub product_name: String,
    /// "fixed" | "variable"
    pub recipe_type: String,
    /// Stock category of the produced good
    pub category: String,
    pub total_price: f64,
    pub created_by: Option<i64>,
    /// Epoch millis
    pub created_at: i64,
}

/// Ingredient row owned by a recipe
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price frozen at add time (estimate only)
    pub price_at_add: f64,
}

/// One ingredient in an add-recipe request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientInput {
    pub stock_id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// Create recipe payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeCreate {
    pub name: String,
    pub product_name: String,
    #[serde(rename = "type")]
    pub recipe_type: String,
    pub category: Option<String>,
    pub created_by: Option<i64>,
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// Expanded ingredient for the read path, priced from live stock
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeIngredientExpanded {
    pub name: String,
    pub quantity: i64,
    /// Stock category, doubling as the display unit
    pub unit: String,
    pub price: f64,
}

/// Recipe with expanded ingredients, as served by `/getRecipes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeExpanded {
    pub id: i64,
    pub name: String,
    pub product_name: String,
    #[serde(rename = "type")]
    pub recipe_type: String,
    pub ingredients: Vec<RecipeIngredientExpanded>,
    /// Live valuation: Σ(quantity × current unit price)
    pub total_price: f64,
    pub date_created: String,
}
