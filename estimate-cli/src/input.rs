use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when command-line text cannot be read as a number.
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims and drops grouping spaces; a lone comma is read as the decimal
/// separator, otherwise commas are thousands separators.
fn normalize_decimal_input(s: &str) -> String {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.contains('.') {
        compact.replace(',', "")
    } else {
        compact.replace(',', ".")
    }
}

/// Parses a quantity or price typed on the command line.
///
/// Accepts `1234.5`, `1,234.5` and `1 234,5`. Empty input is zero.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a markup ratio given either as a fraction (`0.06`) or as a
/// percentage (`6%`).
pub fn parse_ratio(s: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = s.trim();
    match trimmed.strip_suffix('%') {
        Some(percent) => Ok(parse_decimal(percent)? / Decimal::ONE_HUNDRED),
        None => parse_decimal(trimmed),
    }
}
