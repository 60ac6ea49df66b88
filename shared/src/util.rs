//! Small shared helpers: timestamps and money formatting

/// Current time as epoch millis
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Format a monetary value with two decimals: `15.0` → `"15.00"`
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a monetary value with two decimals and thousands separators:
/// `1234.5` → `"1,234.50"`
pub fn format_money_grouped(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{int_grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_two_decimals() {
        assert_eq!(format_money(15.0), "15.00");
        assert_eq!(format_money(6.666_666_7), "6.67");
        assert_eq!(format_money(0.0), "0.00");
    }

    #[test]
    fn money_grouped_thousands() {
        assert_eq!(format_money_grouped(1234.5), "1,234.50");
        assert_eq!(format_money_grouped(999.99), "999.99");
        assert_eq!(format_money_grouped(1_000_000.0), "1,000,000.00");
        assert_eq!(format_money_grouped(0.0), "0.00");
    }

    #[test]
    fn money_grouped_negative() {
        assert_eq!(format_money_grouped(-1234.5), "-1,234.50");
    }
}
