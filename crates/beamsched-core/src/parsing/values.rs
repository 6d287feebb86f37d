use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse a numeric token from drawing text.
///
/// Surrounding brackets and punctuation are trimmed ("(300", "600)," ->
/// 300, 600). Anything that still fails to parse yields zero.
pub fn parse_number(s: &str) -> Decimal {
    let normalized = s
        .trim_matches(|c: char| !c.is_ascii_digit())
        .replace(',', ".");
    Decimal::from_str(&normalized).unwrap_or(Decimal::ZERO)
}

/// Convert millimeters to meters, rounded half away from zero.
pub fn mm_to_m(mm: Decimal, decimals: u32) -> Decimal {
    (mm / Decimal::ONE_THOUSAND)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a dimension measurement (millimeters) as meters with one decimal.
///
/// Non-finite measurements format as "0.0".
pub fn format_dimension(measurement_mm: f64) -> String {
    let mm = Decimal::from_f64(measurement_mm).unwrap_or(Decimal::ZERO);
    format!("{:.1}", mm_to_m(mm, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_plain_integer() {
        assert_eq!(parse_number("300"), dec!(300));
    }

    #[test]
    fn test_brackets_trimmed() {
        assert_eq!(parse_number("(300"), dec!(300));
        assert_eq!(parse_number("600),"), dec!(600));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_number("250,5"), dec!(250.5));
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(parse_number("abc"), Decimal::ZERO);
        assert_eq!(parse_number(""), Decimal::ZERO);
        assert_eq!(parse_number("3.0.0"), Decimal::ZERO);
    }

    #[test]
    fn test_mm_to_m() {
        assert_eq!(mm_to_m(dec!(300), 2), dec!(0.30));
        assert_eq!(mm_to_m(dec!(625), 2), dec!(0.63));
    }

    #[test]
    fn test_format_dimension() {
        assert_eq!(format_dimension(1500.0), "1.5");
        assert_eq!(format_dimension(1250.0), "1.3");
        assert_eq!(format_dimension(900.0), "0.9");
        assert_eq!(format_dimension(f64::NAN), "0.0");
    }
}
