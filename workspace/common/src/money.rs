use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::borrow::Cow;

/// Display symbol for an ISO 4217 code, falling back to the code itself.
pub fn currency_symbol(currency_code: &str) -> Cow<'static, str> {
    match rusty_money::iso::find(currency_code) {
        Some(currency) => Cow::Borrowed(currency.symbol),
        None => Cow::Owned(format!("{} ", currency_code.to_uppercase())),
    }
}

/// Formats a price with its currency symbol and exactly two decimal digits.
///
/// Prices travel as JSON numbers, so rounding happens on the nearest double
/// the same way `Number.toFixed(2)` does it: `87.5` gives `"€87.50"` and
/// `1.005` (stored as 1.00499...) gives `"€1.00"`.
pub fn format_price(amount: Decimal, currency_code: &str) -> String {
    let as_double = amount
        .to_f64()
        .and_then(Decimal::from_f64_retain)
        .unwrap_or(amount);
    let mut rounded = as_double.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{}{}", currency_symbol(currency_code), rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn test_format_price_pads_to_two_digits() {
        assert_eq!(format_price(dec("87.5"), "EUR"), "€87.50");
        assert_eq!(format_price(dec("100"), "EUR"), "€100.00");
    }

    #[test]
    fn test_format_price_rounds_like_to_fixed() {
        // Not exactly representable: the double sits just below the tie
        assert_eq!(format_price(dec("1.005"), "EUR"), "€1.00");
        assert_eq!(format_price(dec("2.675"), "EUR"), "€2.67");
        // Exact binary ties round up
        assert_eq!(format_price(dec("0.125"), "EUR"), "€0.13");
        assert_eq!(format_price(dec("95.125"), "EUR"), "€95.13");
        assert_eq!(format_price(dec("99.994"), "EUR"), "€99.99");
        assert_eq!(format_price(dec("233.33333333"), "EUR"), "€233.33");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        assert_eq!(format_price(dec("5"), "zzz"), "ZZZ 5.00");
    }

    #[test]
    fn test_known_symbols() {
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("USD"), "$");
    }
}
