use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Digits with at most one decimal point. The empty string is accepted so a
/// field can be cleared.
static ACCEPTABLE_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("static pattern is valid"));

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseDecimalError {
    /// The raw text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Returns `true` when `raw` may be stored as the text of a numeric field.
///
/// Keystrokes that would produce anything else (letters, signs, a second
/// decimal point) are rejected before validation runs.
pub fn is_acceptable_input(raw: &str) -> bool {
    ACCEPTABLE_INPUT.is_match(raw)
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into an optional [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input yields `Ok(None)`.
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(None);
    }
    normalized.parse().map(Some).map_err(|e| {
        tracing::warn!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a string into a [`Decimal`], substituting `default` for empty input.
pub fn parse_decimal_or(
    s: &str,
    default: Decimal,
) -> Result<Decimal, ParseDecimalError> {
    parse_optional_decimal(s).map(|value| value.unwrap_or(default))
}
