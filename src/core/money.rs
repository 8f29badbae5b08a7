//! Money and quantity helpers.
//!
//! Formatting follows the international `10,000,000.25` layout for every
//! locale and never changes the value it is given.

/// Price of one base unit derived from a bulk package.
///
/// Returns `0.0` when `units_per_package` is zero or negative instead of
/// dividing by it.
#[must_use]
pub fn unit_price(package_price: f64, units_per_package: f64) -> f64 {
    if units_per_package <= 0.0 {
        return 0.0;
    }
    package_price / units_per_package
}

/// Formats a currency amount with exactly two fraction digits and thousands
/// grouping, e.g. `1234.5` -> `"1,234.50"`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format_decimal(amount, true)
}

/// Formats a plain number with up to two fraction digits and thousands
/// grouping, dropping trailing zeros, e.g. `1234.5` -> `"1,234.5"`, `3.0` -> `"3"`.
#[must_use]
pub fn format_number(value: f64) -> String {
    format_decimal(value, false)
}

/// Parses numeric text typed into a form field.
///
/// Returns `None` for blank, malformed or non-finite input.
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn format_decimal(value: f64, fixed_fraction: bool) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // Cast safety: value is finite; `as` saturates for magnitudes beyond u64 cents.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let fraction = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    if fixed_fraction {
        return format!("{sign}{whole}.{fraction:02}");
    }

    match fraction {
        0 => format!("{sign}{whole}"),
        f if f % 10 == 0 => format!("{sign}{whole}.{}", f / 10),
        f => format!("{sign}{whole}.{f:02}"),
    }
}

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_price_divides_package_price() {
        assert_eq!(unit_price(18.0, 10.0), 1.8);
        assert_eq!(unit_price(5.0, 2.5), 2.0);
    }

    #[test]
    fn test_unit_price_guards_non_positive_package_size() {
        assert_eq!(unit_price(18.0, 0.0), 0.0);
        assert_eq!(unit_price(18.0, -5.0), 0.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(540.0), "540.00");
        assert_eq!(format_currency(1234.5), "1,234.50");
        assert_eq!(format_currency(10_000_000.25), "10,000,000.25");
        assert_eq!(format_currency(-42.1), "-42.10");
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn test_format_number_drops_trailing_zeros() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1234.56), "1,234.56");
        assert_eq!(format_number(1_000_000.0), "1,000,000");
        assert_eq!(format_number(0.333), "0.33");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_currency(f64::INFINITY), "∞");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    proptest! {
        #[test]
        fn prop_unit_price_is_zero_without_positive_package(price in 0.0f64..1e6, units in -1e6f64..=0.0) {
            prop_assert_eq!(unit_price(price, units), 0.0);
        }

        #[test]
        fn prop_currency_text_stays_within_a_cent(value in -1e9f64..1e9) {
            let text = format_currency(value).replace(',', "");
            let parsed: f64 = text.parse().unwrap();
            prop_assert!((parsed - value).abs() <= 0.005 + 1e-6);
        }
    }
}
