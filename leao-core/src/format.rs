//! Brazilian number formatting ("1.234,56") and its inverse.
//!
//! The statement prints money with a period as thousands mark and a comma as
//! decimal mark. All arithmetic runs on raw [`Decimal`]s; only this module
//! touches the locale convention, in both directions, so a formatted value
//! parses back to the decimal it came from.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a Brazilian-formatted number ("1.234,56") into a [`Decimal`].
///
/// Thousand-separator periods are stripped and the decimal comma becomes a
/// decimal point; surrounding whitespace is ignored. Returns an error and
/// logs when the input is not a number.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats a monetary value as "1.234,56": two decimal digits, period as
/// thousands mark, comma as decimal mark. The currency symbol is the
/// caller's business.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let fixed = format!("{:.2}", rounded.abs());
    let (integral, fraction) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };

    let digits = integral.len();
    let mut grouped = String::with_capacity(digits + digits / 3 + 4);
    if rounded < Decimal::ZERO {
        grouped.push('-');
    }
    for (i, digit) in integral.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    grouped.push(',');
    grouped.push_str(fraction);
    grouped
}

/// Formats a percentage as "12,34%": two decimal digits, comma as decimal
/// mark.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value)).replace('.', ",")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_decimal
    // =========================================================================

    #[test]
    fn parse_decimal_handles_thousands_and_comma() {
        assert_eq!(parse_decimal("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("12.345.678,90").unwrap(), dec!(12345678.90));
    }

    #[test]
    fn parse_decimal_handles_plain_values() {
        assert_eq!(parse_decimal("0,00").unwrap(), dec!(0.00));
        assert_eq!(parse_decimal("847,12").unwrap(), dec!(847.12));
    }

    #[test]
    fn parse_decimal_trims_whitespace() {
        assert_eq!(parse_decimal("  1.000,50  ").unwrap(), dec!(1000.50));
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("").is_err());
    }

    // =========================================================================
    // format_currency
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(1234.56)), "1.234,56");
        assert_eq!(format_currency(dec!(12345678.90)), "12.345.678,90");
    }

    #[test]
    fn format_currency_small_values_have_no_separator() {
        assert_eq!(format_currency(dec!(0)), "0,00");
        assert_eq!(format_currency(dec!(999.9)), "999,90");
    }

    #[test]
    fn format_currency_rounds_to_centavos() {
        assert_eq!(format_currency(dec!(10.005)), "10,01");
        assert_eq!(format_currency(dec!(10.004)), "10,00");
    }

    #[test]
    fn format_currency_handles_negatives() {
        assert_eq!(format_currency(dec!(-1234.56)), "-1.234,56");
    }

    #[test]
    fn currency_round_trips_through_parse() {
        for value in [dec!(0.00), dec!(12.34), dec!(1234.56), dec!(9876543.21)] {
            let displayed = format_currency(value);
            let reparsed = parse_decimal(&displayed).unwrap();
            assert_eq!(format_currency(reparsed), displayed);
        }
    }

    // =========================================================================
    // format_percent
    // =========================================================================

    #[test]
    fn format_percent_uses_comma_and_suffix() {
        assert_eq!(format_percent(dec!(12.3456)), "12,35%");
        assert_eq!(format_percent(dec!(0)), "0,00%");
    }
}
