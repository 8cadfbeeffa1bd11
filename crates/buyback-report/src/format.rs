use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display.
///
/// Magnitudes of at least one keep up to 2 decimal places, smaller ones up
/// to 6. Trailing zeros are dropped and the integer part is grouped by
/// thousands.
///
/// Example:
/// assert_eq!(format_amount(Decimal::new(16_666_667, 2)), "166,666.67");
/// assert_eq!(format_amount(Decimal::new(147, 5)), "0.00147");
pub fn format_amount(value: Decimal) -> String {
    let dp = if value.abs() >= Decimal::ONE { 2 } else { 6 };
    let rounded = value
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(Decimal::new(10_000_000, 0)), "10,000,000");
        assert_eq!(format_amount(Decimal::new(999, 0)), "999");
        assert_eq!(format_amount(Decimal::new(1_000, 0)), "1,000");
    }

    #[test]
    fn two_decimals_at_or_above_one() {
        assert_eq!(format_amount(Decimal::new(16_666_666_667, 5)), "166,666.67");
        assert_eq!(format_amount(Decimal::new(1_005, 3)), "1.01");
        assert_eq!(format_amount(Decimal::new(9_800_000, 3)), "9,800");
    }

    #[test]
    fn six_decimals_below_one() {
        assert_eq!(format_amount(Decimal::new(147, 5)), "0.00147");
        assert_eq!(format_amount(Decimal::new(1_234_567_89, 9)), "0.123457");
        assert_eq!(format_amount(Decimal::ZERO), "0");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_amount(Decimal::new(-1_234_500, 2)), "-12,345");
        assert_eq!(format_amount(Decimal::new(-5, 1)), "-0.5");
        assert_eq!(format_amount(Decimal::new(-1, 9)), "0");
    }

    proptest! {
        #[test]
        fn digits_survive_grouping(n in 0i64..1_000_000_000_000) {
            let s = format_amount(Decimal::new(n, 0));
            prop_assert_eq!(s.replace(',', ""), n.to_string());
        }
    }
}
