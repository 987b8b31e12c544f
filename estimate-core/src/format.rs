//! Locale-aware money formatting for display.
//!
//! Amounts are rounded half-up to two places and grouped by thousands. No
//! currency symbol is printed unless asked for, in which case it trails the
//! number.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Separators and currency marker for one display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group_separator: char,
    pub decimal_separator: char,
    pub currency_marker: &'static str,
}

impl NumberLocale {
    /// `1 234 567,89 ₽`, grouped with non-breaking spaces.
    pub const RU: Self = Self {
        group_separator: '\u{a0}',
        decimal_separator: ',',
        currency_marker: "₽",
    };

    /// `1,234,567.89 RUB`
    pub const EN_US: Self = Self {
        group_separator: ',',
        decimal_separator: '.',
        currency_marker: "RUB",
    };

    /// Looks a locale up by tag (`ru`, `ru-RU`, `en`, `en-US`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag.trim().split(['-', '_']).next().unwrap_or_default();
        match lang.to_ascii_lowercase().as_str() {
            "ru" => Some(Self::RU),
            "en" => Some(Self::EN_US),
            _ => None,
        }
    }
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::RU
    }
}

/// Formats `value` with two decimals in the default locale.
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::format_currency;
///
/// assert_eq!(format_currency(dec!(1234567.891)), "1\u{a0}234\u{a0}567,89");
/// ```
pub fn format_currency(value: Decimal) -> String {
    format_currency_in(value, &NumberLocale::default())
}

/// Formats `value` with two decimals and the default currency marker.
pub fn format_currency_with_symbol(value: Decimal) -> String {
    format_currency_with_symbol_in(value, &NumberLocale::default())
}

pub fn format_currency_in(
    value: Decimal,
    locale: &NumberLocale,
) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);

    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, locale.group_separator));
    out.push(locale.decimal_separator);
    out.push_str(frac_part);
    out
}

pub fn format_currency_with_symbol_in(
    value: Decimal,
    locale: &NumberLocale,
) -> String {
    format!(
        "{}\u{a0}{}",
        format_currency_in(value, locale),
        locale.currency_marker
    )
}

/// Renders a markup ratio as a percentage, dropping trailing zeros.
///
/// ```
/// use rust_decimal_macros::dec;
/// use estimate_core::format::format_ratio_percent;
///
/// assert_eq!(format_ratio_percent(dec!(0.06)), "6%");
/// assert_eq!(format_ratio_percent(dec!(0.125)), "12.5%");
/// ```
pub fn format_ratio_percent(ratio: Decimal) -> String {
    let percent = ratio.saturating_mul(Decimal::ONE_HUNDRED).normalize();
    format!("{percent}%")
}

fn group_thousands(
    digits: &str,
    separator: char,
) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
