//! # Domain Types
//!
//! Core domain types used throughout the RocketShoes cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │   StockLevel    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ProductId) │──►│  product fields │   │  u32, ≥ 0       │       │
//! │  │  name           │   │  + amount (≥ 1) │   │  fetched per    │       │
//! │  │  price          │   │                 │   │  mutation       │       │
//! │  │  image          │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stored cart and the catalog share field names with the web
//! storefront, so these types round-trip through the same JSON.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Product Id
// =============================================================================

/// Positive integer identifying a catalog product.
///
/// Serializes as a bare number, matching the catalog's `id` field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    /// Creates a product id from a raw integer, rejecting zero, negatives
    /// and values that don't fit in a `u32`.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "product id".to_string(),
            });
        }

        u32::try_from(raw)
            .map(ProductId)
            .map_err(|_| ValidationError::OutOfRange {
                field: "product id".to_string(),
                min: 1,
                max: u32::MAX as i64,
            })
    }

    /// Returns the raw id.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Checks the positivity invariant (serde accepts zero).
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.trim().parse().map_err(|_| ValidationError::MustBePositive {
            field: "product id".to_string(),
        })?;
        ProductId::new(raw)
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Available quantity of a product, as reported by the stock service.
///
/// Never cached: every cart mutation looks it up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLevel(u32);

impl StockLevel {
    #[inline]
    pub const fn new(amount: u32) -> Self {
        StockLevel(amount)
    }

    #[inline]
    pub const fn amount(&self) -> u32 {
        self.0
    }

    /// Nothing left to sell.
    #[inline]
    pub const fn is_out(&self) -> bool {
        self.0 == 0
    }

    /// True when `requested` units can be taken from this stock.
    #[inline]
    pub const fn covers(&self, requested: u32) -> bool {
        self.0 >= requested
    }
}

/// Stock service payload: `{ "id": 1, "amount": 3 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: ProductId,
    pub amount: u32,
}

impl StockEntry {
    pub fn level(&self) -> StockLevel {
        StockLevel::new(self.amount)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Catalog price, passed through for display only.
    pub price: f64,

    /// Image URL.
    pub image: String,

    /// Any other catalog fields, carried into the cart untouched.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A product in the cart together with the requested amount.
///
/// ## Invariants
/// - `amount >= 1`
/// - `id` is unique across the cart (enforced by [`crate::Cart`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,

    /// Catalog fields beyond the four above.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Creates a cart item from catalog metadata with amount 1.
    pub fn from_product(product: Product) -> Self {
        let mut extra = product.extra;
        extra.remove("amount");

        CartItem {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            amount: 1,
            extra,
        }
    }
}

// =============================================================================
// Amount Update
// =============================================================================

/// Request to set a cart item's amount: `{ "productId": 1, "amount": 4 }`.
///
/// `amount` stays signed: values ≤ 0 are ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AmountUpdate {
    pub product_id: ProductId,
    pub amount: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
