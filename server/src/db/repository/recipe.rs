//! Recipe repository
//!
//! A recipe lists ingredient stock lines with quantities. Adding one
//! stores the ingredient list plus a zero-quantity placeholder line for
//! the produced good; "using" one debits ingredient stock and credits the
//! produced line, priced from the ingredients' current unit prices.

use super::{product, RepoError, RepoResult};
use crate::inventory;
use shared::models::{
    Recipe, RecipeCreate, RecipeExpanded, RecipeIngredient, RecipeIngredientExpanded,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Default category for manufactured output lines
const OUTPUT_CATEGORY: &str = "Final Material";
/// Supplier assigned to manufactured output lines
const OUTPUT_SUPPLIER: &str = "The Factory";

const RECIPE_COLUMNS: &str =
    "recipe_id, name, product_name, recipe_type, category, total_price, created_by, created_at";

/// Create a recipe with its ingredient list.
///
/// `total_price` is the add-time estimate Σ(quantity × submitted price);
/// the produced good gets a zero-quantity stock placeholder at the derived
/// unit price (estimate ÷ total ingredient quantity). One transaction.
pub async fn create(pool: &SqlitePool, data: RecipeCreate) -> RepoResult<i64> {
    if data.ingredients.is_empty() {
        return Err(RepoError::Validation(
            "Missing required field: ingredients".into(),
        ));
    }
    if data.recipe_type != "fixed" && data.recipe_type != "variable" {
        return Err(RepoError::Validation(format!(
            "Invalid type: {} (expected 'fixed' or 'variable')",
            data.recipe_type
        )));
    }

    let total_price: f64 = data
        .ingredients
        .iter()
        .map(|i| i.quantity as f64 * i.price)
        .sum();
    let total_quantity: i64 = data.ingredients.iter().map(|i| i.quantity).sum();
    let unit_price = inventory::recipe_unit_price(total_price, total_quantity);

    // The category travels with the recipe so later production runs land
    // on the same stock line as the placeholder created here.
    let category = data.category.as_deref().unwrap_or(OUTPUT_CATEGORY);

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO recipe (name, product_name, recipe_type, category, total_price, \
         created_by, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.product_name)
    .bind(&data.recipe_type)
    .bind(category)
    .bind(total_price)
    .bind(data.created_by)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;
    let recipe_id = result.last_insert_rowid();

    for ingredient in &data.ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredient (recipe_id, product_id, quantity, price_at_add) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(recipe_id)
        .bind(ingredient.stock_id)
        .bind(ingredient.quantity)
        .bind(ingredient.price)
        .execute(&mut *tx)
        .await?;
    }

    // Zero-quantity placeholder for the produced good; merging into an
    // existing line is a no-op apart from the timestamp.
    product::upsert_line(
        &mut tx,
        &data.product_name,
        category,
        OUTPUT_SUPPLIER,
        0,
        unit_price,
        None,
    )
    .await?;

    tx.commit().await?;
    Ok(recipe_id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipe WHERE recipe_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(recipe)
}

/// All recipes, newest first, ingredients priced from live stock.
///
/// The reported `totalPrice` is the live valuation (current unit prices),
/// not the frozen add-time estimate. Ingredients whose product has been
/// deleted no longer resolve and are skipped.
pub async fn find_all_expanded(pool: &SqlitePool) -> RepoResult<Vec<RecipeExpanded>> {
    let recipes = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipe ORDER BY created_at DESC, recipe_id DESC"
    ))
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let ingredients = sqlx::query_as::<_, RecipeIngredientExpanded>(
            "SELECT s.product_name AS name, ri.quantity, s.category AS unit, \
             ri.quantity * s.unit_price AS price \
             FROM recipe_ingredient ri JOIN stock s ON s.product_id = ri.product_id \
             WHERE ri.recipe_id = ? ORDER BY ri.product_id",
        )
        .bind(recipe.recipe_id)
        .fetch_all(pool)
        .await?;

        let total_price = ingredients.iter().map(|i| i.price).sum();
        result.push(RecipeExpanded {
            id: recipe.recipe_id,
            name: recipe.name,
            product_name: recipe.product_name,
            recipe_type: recipe.recipe_type,
            ingredients,
            total_price,
            date_created: format_date(recipe.created_at),
        });
    }
    Ok(result)
}

fn format_date(epoch_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_millis)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Remove ingredient rows then the recipe row
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_as::<_, (i64,)>("SELECT recipe_id FROM recipe WHERE recipe_id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(RepoError::NotFound(format!("Recipe {id} not found")));
    }

    sqlx::query("DELETE FROM recipe_ingredient WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM recipe WHERE recipe_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Produce `quantity_to_produce` units: debit every ingredient, credit the
/// produced good's stock line, all in one transaction.
///
/// Ingredient cost is evaluated at current stock prices, never the frozen
/// add-time estimate. The sufficiency check is all-or-nothing: a single
/// short ingredient aborts with every stock line untouched. Returns the
/// produced line's product id.
pub async fn use_recipe(
    pool: &SqlitePool,
    id: i64,
    quantity_to_produce: i64,
) -> RepoResult<i64> {
    if quantity_to_produce <= 0 {
        return Err(RepoError::Validation(
            "quantity must be a positive integer".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    let recipe = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipe WHERE recipe_id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Recipe {id} not found")))?;

    let ingredients = sqlx::query_as::<_, RecipeIngredient>(
        "SELECT recipe_id, product_id, quantity, price_at_add FROM recipe_ingredient \
         WHERE recipe_id = ? ORDER BY product_id",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    // Check every ingredient before debiting anything
    let mut cost_per_unit = 0.0_f64;
    for ing in &ingredients {
        let stock = sqlx::query_as::<_, (i64, f64, String)>(
            "SELECT qty_purchased, unit_price, product_name FROM stock WHERE product_id = ?",
        )
        .bind(ing.product_id)
        .fetch_optional(&mut *tx)
        .await?;
        let (on_hand, unit_price, name) = stock.ok_or_else(|| {
            RepoError::NotFound(format!("Ingredient product {} not found", ing.product_id))
        })?;

        let required = ing.quantity * quantity_to_produce;
        if on_hand < required {
            return Err(RepoError::InsufficientStock(format!(
                "Not enough {name} in stock"
            )));
        }
        cost_per_unit += ing.quantity as f64 * unit_price;
    }

    for ing in &ingredients {
        product::adjust_quantity(&mut tx, ing.product_id, -(ing.quantity * quantity_to_produce))
            .await?;
    }

    let total_cost = cost_per_unit * quantity_to_produce as f64;
    let unit_price = total_cost / quantity_to_produce as f64;

    let product_id = product::upsert_line(
        &mut tx,
        &recipe.product_name,
        &recipe.category,
        OUTPUT_SUPPLIER,
        quantity_to_produce,
        unit_price,
        None,
    )
    .await?;

    tx.commit().await?;
    Ok(product_id)
}
