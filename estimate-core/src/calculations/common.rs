//! Shared arithmetic for the estimate calculations.
//!
//! This module provides the zero-guarded markup step used throughout the
//! pricing pipeline, lenient amount parsing for loosely-typed input, and the
//! rounding used when presenting money.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1953.604)), dec!(1953.60));
/// assert_eq!(round_half_up(dec!(1953.605)), dec!(1953.61));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a markup ratio as `base * (1 + ratio)`, but only when `guard` is
/// non-zero; otherwise the result is zero.
///
/// The guard is usually the base itself, but some pipeline steps guard on
/// one component of a composite base. Results beyond the `Decimal` range
/// saturate at [`Decimal::MAX`] or [`Decimal::MIN`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::common::markup_if;
///
/// assert_eq!(markup_if(dec!(100), dec!(100), dec!(0.1)), dec!(110.0));
/// assert_eq!(markup_if(Decimal::ZERO, dec!(100), dec!(0.1)), Decimal::ZERO);
/// ```
pub fn markup_if(
    guard: Decimal,
    base: Decimal,
    ratio: Decimal,
) -> Decimal {
    if guard.is_zero() {
        Decimal::ZERO
    } else {
        base.saturating_mul(Decimal::ONE.saturating_add(ratio))
    }
}

/// Parses a user-entered amount, never failing.
///
/// Whitespace (including non-breaking spaces used as thousands separators)
/// is ignored. A lone comma is read as the decimal separator (`"12,5"`);
/// when both commas and a dot appear, commas are thousands separators
/// (`"1,234.5"`). Empty or unparsable input is zero.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use estimate_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount("1 234,50"), dec!(1234.50));
/// assert_eq!(parse_amount("1,234.50"), dec!(1234.50));
/// assert_eq!(parse_amount("abc"), Decimal::ZERO);
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if compact.contains('.') {
        compact.replace(',', "")
    } else {
        compact.replace(',', ".")
    };

    normalized
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        let result = round_half_up(dec!(-123.455));

        assert_eq!(result, dec!(-123.46));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // markup_if tests
    // =========================================================================

    #[test]
    fn markup_if_applies_ratio_when_guard_nonzero() {
        let result = markup_if(dec!(1000), dec!(1060), dec!(0.6));

        assert_eq!(result, dec!(1696));
    }

    #[test]
    fn markup_if_returns_zero_when_guard_zero() {
        let result = markup_if(Decimal::ZERO, dec!(80), dec!(0.1));

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn markup_if_accepts_negative_ratio() {
        let result = markup_if(dec!(200), dec!(200), dec!(-0.5));

        assert_eq!(result, dec!(100));
    }

    #[test]
    fn markup_if_saturates_instead_of_overflowing() {
        assert_eq!(markup_if(Decimal::MAX, Decimal::MAX, dec!(0.1)), Decimal::MAX);
        assert_eq!(markup_if(Decimal::MIN, Decimal::MIN, dec!(0.1)), Decimal::MIN);
        assert_eq!(markup_if(dec!(1), dec!(2), Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn markup_if_guards_negative_bases_too() {
        let result = markup_if(dec!(-50), dec!(-50), dec!(0.2));

        assert_eq!(result, dec!(-60));
    }

    // =========================================================================
    // parse_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_reads_plain_numbers() {
        assert_eq!(parse_amount("250"), dec!(250));
        assert_eq!(parse_amount("-12.75"), dec!(-12.75));
    }

    #[test]
    fn parse_amount_reads_comma_decimal_separator() {
        assert_eq!(parse_amount("12,5"), dec!(12.5));
    }

    #[test]
    fn parse_amount_strips_space_and_nbsp_grouping() {
        assert_eq!(parse_amount(" 1 234 567,89 "), dec!(1234567.89));
        assert_eq!(parse_amount("1\u{a0}234,5"), dec!(1234.5));
        assert_eq!(parse_amount("1\u{202f}000"), dec!(1000));
    }

    #[test]
    fn parse_amount_reads_comma_thousands_with_dot() {
        assert_eq!(parse_amount("1,234,567.89"), dec!(1234567.89));
    }

    #[test]
    fn parse_amount_reads_scientific_notation() {
        assert_eq!(parse_amount("1.5e3"), dec!(1500));
    }

    #[test]
    fn parse_amount_defaults_to_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12,5,6"), Decimal::ZERO);
    }
}
