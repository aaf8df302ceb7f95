//! Parsing and display of naira amounts.

use rust_decimal::Decimal;
use taxready_core::calculations::common::round_half_up;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a naira amount.
#[derive(Debug, Error)]
#[error("invalid naira amount '{input}': {source}")]
pub struct ParseNairaError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips the currency marker, thousands separators and surrounding space.
fn normalize_naira_input(s: &str) -> String {
    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let unsigned = unsigned
        .strip_prefix('₦')
        .or_else(|| unsigned.strip_prefix("NGN"))
        .unwrap_or(unsigned);

    let digits: String = unsigned
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if negative && !digits.is_empty() {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Parses a naira amount such as `₦1,200,000.50`, `NGN 500000` or `1,200,000`.
///
/// Empty or whitespace-only input is treated as 0.
pub fn parse_naira(s: &str) -> Result<Decimal, ParseNairaError> {
    let normalized = normalize_naira_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid naira amount: {}", e);
        ParseNairaError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount as `₦1,234,567.89`, rounded to kobo.
pub fn format_naira(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let text = format!("{:.2}", rounded.abs());
    let (whole, kobo) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}₦{grouped}.{kobo}")
}

/// Formats a rate such as `0.15` as `15%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
