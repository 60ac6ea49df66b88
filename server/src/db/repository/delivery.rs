//! Delivery repository
//!
//! Creating a delivery debits the referenced stock lines; deleting it
//! credits them back. Both run as a single transaction so a failing line
//! never leaves a partial debit behind.

use super::{product, RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{
    Delivery, DeliveryCreate, DeliveryExpanded, DeliveryLineExpanded, DeliveryUpdate,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_delivery_date(raw: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| RepoError::Validation(format!("Invalid deliveryDate: {raw} (expected YYYY-MM-DD)")))
}

/// Create a delivery with its lines, debiting stock per line.
///
/// Any missing product or insufficient line aborts the whole transaction;
/// no debit survives a failed create.
pub async fn create(pool: &SqlitePool, data: DeliveryCreate) -> RepoResult<i64> {
    let delivery_date = parse_delivery_date(&data.delivery_date)?;
    if data.products.is_empty() {
        return Err(RepoError::Validation(
            "Missing required field: products".into(),
        ));
    }

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO delivery (order_id, customer_name, delivery_address, delivery_date, \
         status, delivery_type, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(data.order_id)
    .bind(&data.customer_name)
    .bind(&data.delivery_address)
    .bind(delivery_date)
    .bind(&data.status)
    .bind(&data.delivery_type)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;
    let delivery_id = result.last_insert_rowid();

    for line in &data.products {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT product_name FROM stock WHERE product_id = ?",
        )
        .bind(line.id)
        .fetch_optional(&mut *tx)
        .await?;
        let (product_name,) = row
            .ok_or_else(|| RepoError::NotFound(format!("Product ID {} not found", line.id)))?;

        if line.quantity <= 0 {
            return Err(RepoError::Validation(format!(
                "Invalid quantity for product {product_name}"
            )));
        }

        product::adjust_quantity(&mut tx, line.id, -line.quantity)
            .await
            .map_err(|e| match e {
                RepoError::InsufficientStock(_) => RepoError::InsufficientStock(format!(
                    "Insufficient stock for product {product_name}"
                )),
                other => other,
            })?;

        sqlx::query(
            "INSERT INTO delivery_product (delivery_id, product_id, quantity) VALUES (?, ?, ?)",
        )
        .bind(delivery_id)
        .bind(line.id)
        .bind(line.quantity)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(delivery_id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Delivery>> {
    let delivery = sqlx::query_as::<_, Delivery>(
        "SELECT delivery_id, order_id, customer_name, delivery_address, delivery_date, \
         status, delivery_type, created_at FROM delivery WHERE delivery_id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(delivery)
}

/// All deliveries with their lines expanded to `{id, name, quantity}`.
/// Lines whose product has been deleted no longer resolve and are skipped.
pub async fn find_all_expanded(pool: &SqlitePool) -> RepoResult<Vec<DeliveryExpanded>> {
    let deliveries = sqlx::query_as::<_, Delivery>(
        "SELECT delivery_id, order_id, customer_name, delivery_address, delivery_date, \
         status, delivery_type, created_at FROM delivery ORDER BY delivery_id",
    )
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(deliveries.len());
    for delivery in deliveries {
        let products = sqlx::query_as::<_, DeliveryLineExpanded>(
            "SELECT dp.product_id AS id, s.product_name AS name, dp.quantity \
             FROM delivery_product dp JOIN stock s ON s.product_id = dp.product_id \
             WHERE dp.delivery_id = ? ORDER BY dp.product_id",
        )
        .bind(delivery.delivery_id)
        .fetch_all(pool)
        .await?;

        result.push(DeliveryExpanded {
            delivery_id: delivery.delivery_id,
            order_id: delivery.order_id,
            customer_name: delivery.customer_name,
            delivery_address: delivery.delivery_address,
            delivery_date: delivery.delivery_date.format(DATE_FORMAT).to_string(),
            status: delivery.status,
            delivery_type: delivery.delivery_type,
            products,
        });
    }
    Ok(result)
}

/// Partial update of the delivery header. Lines and stock are never
/// touched here.
pub async fn update(pool: &SqlitePool, id: i64, data: DeliveryUpdate) -> RepoResult<Delivery> {
    let delivery_date = data
        .delivery_date
        .as_deref()
        .map(parse_delivery_date)
        .transpose()?;

    let rows = sqlx::query(
        "UPDATE delivery SET customer_name = COALESCE(?1, customer_name), \
         delivery_address = COALESCE(?2, delivery_address), \
         delivery_date = COALESCE(?3, delivery_date), \
         status = COALESCE(?4, status), \
         delivery_type = COALESCE(?5, delivery_type) WHERE delivery_id = ?6",
    )
    .bind(&data.customer_name)
    .bind(&data.delivery_address)
    .bind(delivery_date)
    .bind(&data.status)
    .bind(&data.delivery_type)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Delivery {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Delivery {id} not found")))
}

/// Delete a delivery: credit every line back to its stock line, then
/// remove the lines and the header, all in one transaction.
///
/// A repeated delete fails `NotFound` before any credit happens, so stock
/// can never be credited twice. Orphaned lines (product deleted since)
/// are skipped on credit.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let exists = sqlx::query_as::<_, (i64,)>("SELECT delivery_id FROM delivery WHERE delivery_id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if exists.is_none() {
        return Err(RepoError::NotFound(format!("Delivery {id} not found")));
    }

    let lines = sqlx::query_as::<_, (i64, i64)>(
        "SELECT product_id, quantity FROM delivery_product WHERE delivery_id = ?",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    for (product_id, quantity) in lines {
        match product::adjust_quantity(&mut tx, product_id, quantity).await {
            Ok(()) => {}
            Err(RepoError::NotFound(_)) => {
                tracing::warn!(product_id, delivery_id = id, "Skipping credit for orphaned delivery line");
            }
            Err(e) => return Err(e),
        }
    }

    sqlx::query("DELETE FROM delivery_product WHERE delivery_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM delivery WHERE delivery_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::product::tests::{purchase, test_pool};
    use shared::models::DeliveryLine;

    async fn seed_product(pool: &SqlitePool, name: &str, qty: i64, price: f64) -> i64 {
        product::create_or_merge(pool, purchase(name, qty, price))
            .await
            .unwrap()
            .product_id
    }

    fn delivery_request(lines: Vec<DeliveryLine>) -> DeliveryCreate {
        DeliveryCreate {
            order_id: 77,
            customer_name: "Bob's Bakery".to_string(),
            delivery_address: "1 Main St".to_string(),
            delivery_date: "2024-06-01".to_string(),
            status: "Pending".to_string(),
            delivery_type: "Standard".to_string(),
            products: lines,
        }
    }

    #[tokio::test]
    async fn create_debits_each_line() {
        let pool = test_pool().await;
        let flour = seed_product(&pool, "Flour", 50, 2.0).await;
        let sugar = seed_product(&pool, "Sugar", 30, 1.0).await;

        let id = create(
            &pool,
            delivery_request(vec![
                DeliveryLine { id: flour, quantity: 20 },
                DeliveryLine { id: sugar, quantity: 5 },
            ]),
        )
        .await
        .unwrap();
        assert!(id > 0);

        let flour = product::find_by_id(&pool, flour).await.unwrap().unwrap();
        let sugar = product::find_by_id(&pool, sugar).await.unwrap().unwrap();
        assert_eq!(flour.qty_purchased, 30);
        assert_eq!(sugar.qty_purchased, 25);
        assert!((flour.total_amount - 60.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn insufficient_line_rolls_back_everything() {
        let pool = test_pool().await;
        let flour = seed_product(&pool, "Flour", 50, 2.0).await;
        let sugar = seed_product(&pool, "Sugar", 3, 1.0).await;

        let err = create(
            &pool,
            delivery_request(vec![
                DeliveryLine { id: flour, quantity: 20 },
                DeliveryLine { id: sugar, quantity: 5 },
            ]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::InsufficientStock(_)));

        // First line's debit must not survive
        let flour = product::find_by_id(&pool, flour).await.unwrap().unwrap();
        assert_eq!(flour.qty_purchased, 50);
        assert!(find_all_expanded(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let pool = test_pool().await;
        let err = create(&pool, delivery_request(vec![DeliveryLine { id: 404, quantity: 1 }]))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn bad_date_is_a_validation_error() {
        let pool = test_pool().await;
        let mut req = delivery_request(vec![DeliveryLine { id: 1, quantity: 1 }]);
        req.delivery_date = "01-06-2024".to_string();
        let err = create(&pool, req).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn expanded_listing_resolves_names() {
        let pool = test_pool().await;
        let flour = seed_product(&pool, "Flour", 50, 2.0).await;
        create(&pool, delivery_request(vec![DeliveryLine { id: flour, quantity: 10 }]))
            .await
            .unwrap();

        let all = find_all_expanded(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].customer_name, "Bob's Bakery");
        assert_eq!(all[0].delivery_date, "2024-06-01");
        assert_eq!(all[0].products.len(), 1);
        assert_eq!(all[0].products[0].name, "Flour");
        assert_eq!(all[0].products[0].quantity, 10);
    }

    #[tokio::test]
    async fn update_touches_header_only() {
        let pool = test_pool().await;
        let flour = seed_product(&pool, "Flour", 50, 2.0).await;
        let id = create(&pool, delivery_request(vec![DeliveryLine { id: flour, quantity: 10 }]))
            .await
            .unwrap();

        let updated = update(
            &pool,
            id,
            DeliveryUpdate {
                status: Some("Shipped".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, "Shipped");
        assert_eq!(updated.customer_name, "Bob's Bakery");

        // Stock unchanged by a header update
        let flour = product::find_by_id(&pool, flour).await.unwrap().unwrap();
        assert_eq!(flour.qty_purchased, 40);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let pool = test_pool().await;
        let err = update(&pool, 9, DeliveryUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_credits_back_exactly_once() {
        let pool = test_pool().await;
        let flour = seed_product(&pool, "Flour", 50, 2.0).await;
        let sugar = seed_product(&pool, "Sugar", 30, 1.0).await;
        let id = create(
            &pool,
            delivery_request(vec![
                DeliveryLine { id: flour, quantity: 3 },
                DeliveryLine { id: sugar, quantity: 2 },
            ]),
        )
        .await
        .unwrap();

        delete(&pool, id).await.unwrap();

        let flour_row = product::find_by_id(&pool, flour).await.unwrap().unwrap();
        let sugar_row = product::find_by_id(&pool, sugar).await.unwrap().unwrap();
        assert_eq!(flour_row.qty_purchased, 50);
        assert_eq!(sugar_row.qty_purchased, 30);

        // Second delete fails NotFound and must not re-credit
        let err = delete(&pool, id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        let flour_row = product::find_by_id(&pool, flour).await.unwrap().unwrap();
        assert_eq!(flour_row.qty_purchased, 50);
    }

    #[tokio::test]
    async fn delete_skips_orphaned_lines() {
        let pool = test_pool().await;
        let flour = seed_product(&pool, "Flour", 50, 2.0).await;
        let id = create(&pool, delivery_request(vec![DeliveryLine { id: flour, quantity: 5 }]))
            .await
            .unwrap();

        // Product removed while still referenced: documented orphaning
        product::delete(&pool, flour).await.unwrap();
        delete(&pool, id).await.unwrap();
        assert!(find_by_id(&pool, id).await.unwrap().is_none());
    }
}
