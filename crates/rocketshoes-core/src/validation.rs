//! # Validation Module
//!
//! Input validation for cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (CLI args, web frontend)                              │
//! │  └── Parse raw integers                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Requested amounts: ≤ 0 means "ignore", larger ones saturate       │
//! │  └── Stored carts: amount ≥ 1, ids unique                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart rules (cart.rs)                                         │
//! │  └── Stock comparisons                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::CartItem;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a requested cart amount.
///
/// ## Returns
/// - `None` for amounts ≤ 0: the update is ignored, not rejected
/// - `Some(n)` otherwise, saturating at `u32::MAX` so that a huge request
///   still reaches the stock check and fails there
///
/// ## Example
/// ```rust
/// use rocketshoes_core::validation::validate_requested_amount;
///
/// assert_eq!(validate_requested_amount(3), Some(3));
/// assert_eq!(validate_requested_amount(0), None);
/// assert_eq!(validate_requested_amount(i64::MAX), Some(u32::MAX));
/// ```
pub fn validate_requested_amount(amount: i64) -> Option<u32> {
    if amount <= 0 {
        return None;
    }

    Some(u32::try_from(amount).unwrap_or(u32::MAX))
}

/// Validates a list of items read back from storage.
///
/// ## Rules
/// - Every id is positive
/// - Every amount is at least 1
/// - No id appears twice
pub fn validate_cart_items(items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        if !item.id.is_valid() {
            return Err(ValidationError::MustBePositive {
                field: "product id".to_string(),
            });
        }

        if item.amount == 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("amount of product {}", item.id),
            });
        }

        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: item.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
