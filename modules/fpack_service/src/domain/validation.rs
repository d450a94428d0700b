//! Input validation for catalog and configuration writes

use crate::contract::FpackError;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Longest name or reference accepted
pub const MAX_TEXT_LEN: usize = 255;

/// Product references are shorter than other references
pub const MAX_PRODUCT_REFERENCE_LEN: usize = 60;

/// Validate a required text field, returning it trimmed
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<String, FpackError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FpackError::Validation {
            message: format!("{} cannot be empty", field),
        });
    }

    if trimmed.chars().count() > max_len {
        return Err(FpackError::Validation {
            message: format!("{} exceeds {} characters", field, max_len),
        });
    }

    Ok(trimmed.to_string())
}

/// Validate an optional text field; blank values become `None`
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max_len: usize,
) -> Result<Option<String>, FpackError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => validate_text(field, v, max_len).map(Some),
    }
}

/// Validate a composition quantity
pub fn validate_quantity(quantity: i64) -> Result<u32, FpackError> {
    if quantity < 1 {
        return Err(FpackError::Validation {
            message: format!("quantity must be at least 1, got {}", quantity),
        });
    }

    u32::try_from(quantity).map_err(|_| FpackError::Validation {
        message: format!("quantity {} is too large", quantity),
    })
}

/// Validate a unit price or transport price
pub fn validate_amount(field: &str, amount: Decimal) -> Result<(), FpackError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(FpackError::Validation {
            message: format!("{} cannot be negative, got {}", field, amount),
        });
    }
    Ok(())
}

/// Orders appearing more than once, ascending
pub fn duplicate_orders(orders: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for order in orders {
        if !seen.insert(order) {
            duplicates.insert(order);
        }
    }
    duplicates.into_iter().collect()
}
