//! Product (stock line) repository
//!
//! The inventory ledger: owns every mutation of the `stock` table and
//! keeps the derived fields (`total_amount`, `status`) consistent with
//! quantity and unit price.

use super::{RepoError, RepoResult};
use crate::inventory;
use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "product_id, product_name, category, qty_purchased, unit_price, \
     total_amount, supplier, status, image, last_updated";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM stock ORDER BY product_id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(products)
}

/// Page through stock lines, 1-based page index
pub async fn find_page(pool: &SqlitePool, page: u32, per_page: u32) -> RepoResult<Vec<Product>> {
    let page = page.max(1);
    let offset = (page - 1) as i64 * per_page as i64;
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM stock ORDER BY product_id LIMIT ? OFFSET ?"
    ))
    .bind(per_page as i64)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(products)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM stock WHERE product_id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(product)
}

/// Create a stock line, or merge the purchase into the line that already
/// carries the `(product_name, category, supplier)` natural key.
///
/// The lookup and write run in one transaction. A concurrent create of
/// the same key can still surface as a unique-index violation; the merge
/// is then retried once against the now-existing line.
pub async fn create_or_merge(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    match merge_once(pool, &data).await {
        Err(RepoError::Database(msg)) if msg.contains("UNIQUE constraint failed") => {
            merge_once(pool, &data).await
        }
        result => result,
    }
}

async fn merge_once(pool: &SqlitePool, data: &ProductCreate) -> RepoResult<Product> {
    let mut tx = pool.begin().await?;
    let id = upsert_line(
        &mut tx,
        &data.product_name,
        &data.category,
        &data.supplier,
        data.qty_purchased,
        data.unit_price,
        data.image.as_deref(),
    )
    .await?;
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Transaction-scoped create-or-merge, shared with the recipe compiler
/// (manufactured output is credited through the same path as a purchase).
pub(crate) async fn upsert_line(
    conn: &mut SqliteConnection,
    product_name: &str,
    category: &str,
    supplier: &str,
    qty: i64,
    unit_price: f64,
    image: Option<&str>,
) -> RepoResult<i64> {
    let now = now_millis();
    let existing = sqlx::query_as::<_, (i64, i64, f64)>(
        "SELECT product_id, qty_purchased, unit_price FROM stock \
         WHERE product_name = ? AND category = ? AND supplier = ?",
    )
    .bind(product_name)
    .bind(category)
    .bind(supplier)
    .fetch_optional(&mut *conn)
    .await?;

    match existing {
        Some((id, existing_qty, existing_price)) => {
            let (new_qty, new_price) =
                inventory::merge_purchase(existing_qty, existing_price, qty, unit_price);
            sqlx::query(
                "UPDATE stock SET qty_purchased = ?, unit_price = ?, total_amount = ?, \
                 status = ?, image = COALESCE(?, image), last_updated = ? WHERE product_id = ?",
            )
            .bind(new_qty)
            .bind(new_price)
            .bind(inventory::line_total(new_qty, new_price))
            .bind(inventory::stock_status(new_qty))
            .bind(image)
            .bind(now)
            .bind(id)
            .execute(&mut *conn)
            .await?;
            Ok(id)
        }
        None => {
            let result = sqlx::query(
                "INSERT INTO stock (product_name, category, qty_purchased, unit_price, \
                 total_amount, supplier, status, image, last_updated) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(product_name)
            .bind(category)
            .bind(qty)
            .bind(unit_price)
            .bind(inventory::line_total(qty, unit_price))
            .bind(supplier)
            .bind(inventory::stock_status(qty))
            .bind(image)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            Ok(result.last_insert_rowid())
        }
    }
}

/// Full-field overwrite. `total_amount` and `status` are recomputed from
/// the incoming quantity and price; a client-supplied status is ignored.
pub async fn update(pool: &SqlitePool, data: ProductUpdate) -> RepoResult<Product> {
    let rows = sqlx::query(
        "UPDATE stock SET product_name = ?, category = ?, qty_purchased = ?, unit_price = ?, \
         total_amount = ?, supplier = ?, status = ?, image = COALESCE(?, image), \
         last_updated = ? WHERE product_id = ?",
    )
    .bind(&data.product_name)
    .bind(&data.category)
    .bind(data.qty_purchased)
    .bind(data.unit_price)
    .bind(inventory::line_total(data.qty_purchased, data.unit_price))
    .bind(&data.supplier)
    .bind(inventory::stock_status(data.qty_purchased))
    .bind(data.image.as_deref())
    .bind(now_millis())
    .bind(data.product_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Product {} not found",
            data.product_id
        )));
    }

    find_by_id(pool, data.product_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", data.product_id)))
}

/// Unconditional removal. Delivery lines and recipe ingredients that still
/// reference the id are orphaned on purpose (see DESIGN.md).
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM stock WHERE product_id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}

/// Apply a signed quantity delta (negative = debit, positive = credit) and
/// recompute the derived fields.
///
/// Transaction-scoped so the delivery processor and recipe compiler can
/// batch several adjustments atomically. A debit below zero fails
/// `InsufficientStock` without touching the row.
pub async fn adjust_quantity(
    conn: &mut SqliteConnection,
    product_id: i64,
    delta: i64,
) -> RepoResult<()> {
    let row = sqlx::query_as::<_, (i64, f64)>(
        "SELECT qty_purchased, unit_price FROM stock WHERE product_id = ?",
    )
    .bind(product_id)
    .fetch_optional(&mut *conn)
    .await?;

    let (qty, unit_price) =
        row.ok_or_else(|| RepoError::NotFound(format!("Product {product_id} not found")))?;

    let new_qty = qty + delta;
    if new_qty < 0 {
        return Err(RepoError::InsufficientStock(format!(
            "Insufficient stock for product {product_id}"
        )));
    }

    sqlx::query(
        "UPDATE stock SET qty_purchased = ?, total_amount = ?, status = ?, last_updated = ? \
         WHERE product_id = ?",
    )
    .bind(new_qty)
    .bind(inventory::line_total(new_qty, unit_price))
    .bind(inventory::stock_status(new_qty))
    .bind(now_millis())
    .bind(product_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
