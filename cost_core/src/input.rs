//! Parsing of user-typed numbers.
//!
//! Users type amounts the way their locale writes them, so `,` is accepted
//! as the decimal separator. An empty field means "not given".

use crate::errors::{CalcError, CalcResult};

/// Parse a non-negative amount (grams, hours, watts, price).
///
/// Empty input is 0.0. Non-numeric, non-finite and negative input is rejected.
///
/// ```rust
/// use cost_core::input::parse_amount;
///
/// assert_eq!(parse_amount("filament_cost_per_kg", "16,99").unwrap(), 16.99);
/// assert_eq!(parse_amount("print_duration_hours", "  ").unwrap(), 0.0);
/// assert!(parse_amount("printer_power_watts", "-150").is_err());
/// ```
pub fn parse_amount(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| CalcError::invalid_input(field, trimmed, "Not a number"))?;

    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, trimmed, "Value must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, trimmed, "Value must not be negative"));
    }
    Ok(value)
}

/// Parse the number of models. Empty input is 1.
pub fn parse_model_count(text: &str) -> CalcResult<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(1);
    }

    let count: i64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid_input("model_count", trimmed, "Not a whole number"))?;

    if count < 1 {
        return Err(CalcError::invalid_input(
            "model_count",
            trimmed,
            "Model count must be at least 1",
        ));
    }
    u32::try_from(count)
        .map_err(|_| CalcError::invalid_input("model_count", trimmed, "Model count is too large"))
}
