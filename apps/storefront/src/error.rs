//! # Storefront Error Types
//!
//! Errors raised by cart operations and the mapping to what the shopper sees.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  CoreError ─────┐                                                       │
//! │  ServiceError ──┼──► CartError ──┬──► user_message(op) ──► Notifier     │
//! │  StoreError ────┘                │                                      │
//! │                                  └──► ApiError { code, message }        │
//! │                                       (commands layer, CLI output)      │
//! │                                                                         │
//! │  OutOfStock          → "Requested quantity out of stock"                │
//! │  anything else       → generic message for the operation                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rocketshoes_core::CoreError;
use rocketshoes_store::StoreError;
use serde::Serialize;
use thiserror::Error;

use crate::messages::Messages;
use crate::services::ServiceError;
use crate::state::ConfigError;

// =============================================================================
// Cart Errors
// =============================================================================

/// The cart operation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add"),
            CartOperation::Remove => write!(f, "remove"),
            CartOperation::Update => write!(f, "update"),
        }
    }
}

/// Any failure of a cart mutation.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart rule refused the change.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The stock service or catalog failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The cart could not be persisted or loaded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CartError {
    pub fn is_out_of_stock(&self) -> bool {
        matches!(self, CartError::Core(CoreError::OutOfStock { .. }))
    }

    /// The message shown to the shopper for a failure during `op`.
    pub fn user_message<'a>(&self, op: CartOperation, messages: &'a Messages) -> &'a str {
        if self.is_out_of_stock() {
            return &messages.out_of_stock;
        }

        match op {
            CartOperation::Add => &messages.add_failed,
            CartOperation::Remove => &messages.remove_failed,
            CartOperation::Update => &messages.update_failed,
        }
    }
}

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// API Errors
// =============================================================================

/// Error returned from the command layer.
///
/// ## Serialization
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Requested quantity out of stock"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Message for display, already localized
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Stock can't cover the requested amount
    OutOfStock,

    /// The product is not in the cart
    NotInCart,

    /// Malformed input (bad product id)
    ValidationError,

    /// Stock service or catalog unreachable or failing
    ServiceUnavailable,

    /// Local storage failed
    StorageError,

    /// Anything else
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Builds the API error for a failed cart operation, carrying the
    /// same message the shopper was notified with.
    pub fn from_cart(err: &CartError, op: CartOperation, messages: &Messages) -> Self {
        ApiError::new(ErrorCode::from(err), err.user_message(op, messages))
    }
}

impl From<&CartError> for ErrorCode {
    fn from(err: &CartError) -> Self {
        match err {
            CartError::Core(CoreError::OutOfStock { .. }) => ErrorCode::OutOfStock,
            CartError::Core(CoreError::ItemNotInCart(_)) => ErrorCode::NotInCart,
            CartError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            CartError::Core(CoreError::InvalidCart(_)) => ErrorCode::Internal,
            CartError::Service(_) => ErrorCode::ServiceUnavailable,
            CartError::Store(_) => ErrorCode::StorageError,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Errors
// =============================================================================

/// Failures while wiring the storefront together.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}
