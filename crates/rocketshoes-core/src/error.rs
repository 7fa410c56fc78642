//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocketshoes-store errors (separate crate)                             │
//! │  └── StoreError       - Key/value persistence failures                 │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  ├── CartError        - What a cart operation failed with              │
//! │  └── ApiError         - What command callers see (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → toast / ApiError      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
///
/// Each variant maps to one of the user-facing cart messages: out-of-stock
/// for [`CoreError::OutOfStock`], the per-operation generic message for the
/// rest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Not enough stock for the requested amount.
    ///
    /// ## When This Occurs
    /// - Adding a product whose stock level is zero
    /// - Adding a product already in the cart when stock equals its amount
    /// - Setting an amount above the stock level
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// The product is not in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotInCart(ProductId),

    /// A list of items breaks the cart invariants.
    #[error("Invalid cart contents: {0}")]
    InvalidCart(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., the same product twice in a cart).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
