//! Monetary amount parsing and arithmetic.
//!
//! Amounts cross the wire as decimal strings (e.g. `"150000.00"`). They
//! must be parsed into [`Decimal`] before any arithmetic or comparison;
//! comparing amount strings lexicographically is a defect this module
//! exists to prevent.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Parse a decimal-string amount, rejecting negatives and garbage.
pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Not a numeric amount: '{raw}'")))?;
    if amount < Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "Amount must not be negative: {amount}"
        )));
    }
    Ok(amount)
}

/// Subtotal of one line: quantity times unit price.
pub fn line_subtotal(quantity: i32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Total across lines of `(quantity, unit_price)`.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (i32, Decimal)>,
{
    lines
        .into_iter()
        .map(|(qty, price)| line_subtotal(qty, price))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer_amount() {
        assert_eq!(parse_amount("150000").unwrap(), Decimal::from(150_000));
    }

    #[test]
    fn parses_decimal_string_with_fraction() {
        assert_eq!(
            parse_amount("150000.00").unwrap(),
            "150000.00".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(parse_amount(" 500 ").unwrap(), Decimal::from(500));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(parse_amount("Rp 10.000,-").is_err());
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn rejects_negative() {
        assert!(parse_amount("-1").is_err());
    }

    #[test]
    fn numeric_comparison_not_string_comparison() {
        // "9" > "10000" lexicographically; parsed they compare correctly.
        let small = parse_amount("9").unwrap();
        let big = parse_amount("10000").unwrap();
        assert!(small < big);
    }

    #[test]
    fn line_subtotal_multiplies() {
        assert_eq!(
            line_subtotal(2, Decimal::from(50_000)),
            Decimal::from(100_000)
        );
    }

    #[test]
    fn order_total_sums_subtotals() {
        let total = order_total([(2, Decimal::from(50_000)), (1, Decimal::from(100_000))]);
        assert_eq!(total, Decimal::from(200_000));
    }

    #[test]
    fn order_total_of_no_lines_is_zero() {
        let no_lines: [(i32, Decimal); 0] = [];
        assert_eq!(order_total(no_lines), Decimal::ZERO);
    }
}
