use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when user text cannot be turned into an amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("invalid amount '{input}': {reason}")]
    Invalid { input: String, reason: String },

    #[error("amount '{0}' must not be negative")]
    Negative(String),
}

/// Normalizes input for decimal parsing: trims whitespace and removes the
/// dollar sign and commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace([',', '$'], "")
}

/// Parses user-entered text into a non-negative amount.
///
/// Handles `$` and comma thousands separators (e.g. `"$1,234.56"`).
/// Empty or whitespace-only input is treated as 0; anything else that is not
/// a non-negative number is an error, so the engine only ever sees valid
/// amounts.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let value: Decimal = normalized.parse().map_err(|e: rust_decimal::Error| {
        tracing::warn!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid {
            input: s.to_string(),
            reason: e.to_string(),
        }
    })?;

    if value < Decimal::ZERO {
        return Err(ParseAmountError::Negative(s.to_string()));
    }
    Ok(value)
}

/// Formats an amount as US currency, e.g. `$1,234.56` or `-$12.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a ratio as a percentage with two decimals, e.g. `0.2074` as
/// `20.74%`.
pub fn format_percentage(ratio: Decimal) -> String {
    let percent = (ratio * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.2}%")
}
