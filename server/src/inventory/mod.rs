//! Stock arithmetic
//!
//! Pure calculations shared by the product, delivery and recipe
//! repositories: the stock-status threshold function, line totals and the
//! weighted-average merge applied when a purchase lands on an existing
//! stock line. Keeping these out of the storage layer makes the invariants
//! (`total_amount == qty * unit_price`, status derived from quantity)
//! testable without a database.

/// Quantities at or below this count as "Low in stock"
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Stock line is available for consumption
pub const STATUS_AVAILABLE: &str = "Available";
/// Stock line is running low
pub const STATUS_LOW: &str = "Low in stock";
/// Stock line is empty
pub const STATUS_OUT: &str = "Out of stock";

/// Derive the display status from a quantity on hand
pub fn stock_status(qty: i64) -> &'static str {
    if qty <= 0 {
        STATUS_OUT
    } else if qty <= LOW_STOCK_THRESHOLD {
        STATUS_LOW
    } else {
        STATUS_AVAILABLE
    }
}

/// Cached total for a stock line
pub fn line_total(qty: i64, unit_price: f64) -> f64 {
    qty as f64 * unit_price
}

/// Merge a new purchase into an existing line.
///
/// Returns the merged `(quantity, unit_price)`; the price is the
/// quantity-weighted average of both purchases. A merged quantity of zero
/// yields price 0 rather than dividing by zero.
pub fn merge_purchase(
    existing_qty: i64,
    existing_price: f64,
    purchased_qty: i64,
    purchased_price: f64,
) -> (i64, f64) {
    let new_qty = existing_qty + purchased_qty;
    let new_price = if new_qty == 0 {
        0.0
    } else {
        (existing_qty as f64 * existing_price + purchased_qty as f64 * purchased_price)
            / new_qty as f64
    };
    (new_qty, new_price)
}

/// Aggregate cost and unit price for a recipe's ingredient list.
///
/// `unit_price = total_price / total_quantity`, 0 when nothing is listed.
pub fn recipe_unit_price(total_price: f64, total_quantity: i64) -> f64 {
    if total_quantity == 0 {
        0.0
    } else {
        total_price / total_quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(stock_status(0), STATUS_OUT);
        assert_eq!(stock_status(1), STATUS_LOW);
        assert_eq!(stock_status(10), STATUS_LOW);
        assert_eq!(stock_status(11), STATUS_AVAILABLE);
        assert_eq!(stock_status(500), STATUS_AVAILABLE);
    }

    #[test]
    fn status_never_negative_quantity_is_out() {
        // Quantities cannot go negative through the repositories, but the
        // function itself must not misclassify a bad row.
        assert_eq!(stock_status(-3), STATUS_OUT);
    }

    #[test]
    fn merge_weighted_average() {
        // 5 @ 10 merged into 5 @ 20 → 10 @ 15
        let (qty, price) = merge_purchase(5, 20.0, 5, 10.0);
        assert_eq!(qty, 10);
        assert!((price - 15.0).abs() < 1e-9);
        assert!((line_total(qty, price) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn merge_zero_quantity_yields_zero_price() {
        let (qty, price) = merge_purchase(0, 12.5, 0, 99.0);
        assert_eq!(qty, 0);
        assert_eq!(price, 0.0);
    }

    #[test]
    fn merge_into_empty_line_takes_new_price() {
        let (qty, price) = merge_purchase(0, 0.0, 7, 3.5);
        assert_eq!(qty, 7);
        assert!((price - 3.5).abs() < 1e-9);
    }

    #[test]
    fn recipe_unit_price_divides_by_quantity() {
        // {2 @ 5, 1 @ 10} → total 20, unit 20/3
        let total: f64 = 2.0 * 5.0 + 1.0 * 10.0;
        assert!((total - 20.0).abs() < 1e-9);
        let unit = recipe_unit_price(total, 3);
        assert!((unit - 20.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn recipe_unit_price_empty_is_zero() {
        assert_eq!(recipe_unit_price(0.0, 0), 0.0);
    }
}
