use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary amount to two decimal places, half away from zero.
///
/// This is the only rounding rule applied to money anywhere in the report.
/// The result always carries a scale of exactly two.
///
/// # Examples
///
/// ```
/// use report_core::formatting::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(2.675)).to_string(), "2.68");
/// assert_eq!(round2(dec!(-0.125)).to_string(), "-0.13");
/// assert_eq!(round2(dec!(5)).to_string(), "5.00");
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}

/// Canonical bucket key for an entry fee: `"$"` followed by the fee in fixed
/// two-decimal form.
///
/// # Examples
///
/// ```
/// use report_core::formatting::fee_key;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(fee_key(dec!(5)), "$5.00");
/// assert_eq!(fee_key(dec!(5.0)), "$5.00");
/// assert_eq!(fee_key(dec!(10.5)), "$10.50");
/// ```
pub fn fee_key(fee: Decimal) -> String {
    format!("${}", round2(fee))
}

/// Calculate `(part / whole) * 100`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use report_core::formatting::percentage;
///
/// assert!((percentage(1.0, 100.0) - 1.0).abs() < 1e-9);
/// assert_eq!(percentage(3.0, 0.0), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}

/// Format a monetary amount as a USD string with two decimal places and
/// thousands separators.
///
/// # Examples
///
/// ```
/// use report_core::formatting::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(1234.56)), "$1,234.56");
/// assert_eq!(format_currency(dec!(0)), "$0.00");
/// assert_eq!(format_currency(dec!(-9.99)), "$-9.99");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round2(amount);
    let digits = rounded.abs().to_string();
    let (integer_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let grouped = group_thousands(integer_part);

    if rounded.is_sign_negative() {
        format!("$-{}.{}", grouped, frac_part)
    } else {
        format!("${}.{}", grouped, frac_part)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ── round2 ───────────────────────────────────────────────────────────────

    #[test]
    fn test_round2_midpoint_away_from_zero() {
        assert_eq!(round2(dec!(0.125)), dec!(0.13));
        assert_eq!(round2(dec!(2.675)), dec!(2.68));
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn test_round2_below_midpoint() {
        assert_eq!(round2(dec!(0.124)), dec!(0.12));
        assert_eq!(round2(dec!(10.3349)), dec!(10.33));
    }

    #[test]
    fn test_round2_fixes_scale() {
        assert_eq!(round2(dec!(5)).to_string(), "5.00");
        assert_eq!(round2(dec!(5.5)).to_string(), "5.50");
        assert_eq!(round2(dec!(5.123)).to_string(), "5.12");
    }

    #[test]
    fn test_round2_negative_zero_is_positive() {
        assert_eq!(round2(dec!(-0.001)).to_string(), "0.00");
    }

    // ── fee_key ──────────────────────────────────────────────────────────────

    #[test]
    fn test_fee_key_canonical_form() {
        assert_eq!(fee_key(dec!(5)), "$5.00");
        assert_eq!(fee_key(dec!(5.00)), "$5.00");
        assert_eq!(fee_key(dec!(0)), "$0.00");
        assert_eq!(fee_key(dec!(109.999)), "$110.00");
    }

    // ── percentage ───────────────────────────────────────────────────────────

    #[test]
    fn test_percentage_basic() {
        let p = percentage(50.0, 200.0);
        assert!((p - 25.0).abs() < 1e-9, "percentage = {p}");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_percentage_not_rounded() {
        let p = percentage(1.0, 3.0);
        assert!((p - 100.0 / 3.0).abs() < 1e-9, "percentage = {p}");
    }

    // ── format_currency ──────────────────────────────────────────────────────

    #[test]
    fn test_format_currency_positive() {
        assert_eq!(format_currency(dec!(1234.56)), "$1,234.56");
    }

    #[test]
    fn test_format_currency_zero() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(dec!(-9.99)), "$-9.99");
        assert_eq!(format_currency(dec!(-1234.5)), "$-1,234.50");
    }

    #[test]
    fn test_format_currency_large() {
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000.00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("5"), "5");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }
}
