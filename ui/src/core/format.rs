//! Formatting helpers for presenting metrics.

/// Currency with two decimals and thousands separators, e.g. `$12,345.60`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    let grouped = group_thousands(whole);
    if negative {
        format!("-${grouped}.{fraction:02}")
    } else {
        format!("${grouped}.{fraction:02}")
    }
}

/// Percentage with two decimals. Input is already on the 0–100 scale.
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}%")
    } else {
        "—".to_string()
    }
}

pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_keeps_two_decimals() {
        assert_eq!(format_currency(300.0), "$300.00");
        assert_eq!(format_currency(150.0), "$150.00");
        assert_eq!(format_currency(0.005), "$0.01");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(1000.0), "$1,000.00");
    }

    #[test]
    fn percent_is_already_scaled() {
        assert_eq!(format_percent(62.5), "62.50%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(f64::NAN), "—");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(25000), "25,000");
    }
}
