//! # rocketshoes-core: Pure Cart Rules for the RocketShoes Storefront
//!
//! This crate decides how the shopping cart may change. It never talks to
//! the stock service, the catalog, or local storage: callers fetch those
//! values and hand them in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RocketShoes Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (CartStore, CLI)                     │   │
//! │  │   add_product ──► remove_product ──► update_product_amount      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ stock level, product metadata          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ rocketshoes-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │ validation│  │   error   │  │   │
//! │  │   │ ProductId │  │   Cart    │  │  ids and  │  │ CoreError │  │   │
//! │  │   │ StockLevel│  │  AddPlan  │  │  amounts  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            rocketshoes-store (Persistence Layer)                │   │
//! │  │           key/value blob under "@RocketShoes:cart"              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, StockLevel, Product, CartItem)
//! - [`cart`] - The ordered cart and its mutation rules
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for ids and amounts
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{AddPlan, Cart, ProductId, StockLevel};
//!
//! let cart = Cart::new();
//! let id = ProductId::new(7).unwrap();
//!
//! // Not in the cart yet and in stock: the caller must fetch the product.
//! let plan = cart.plan_add(id, StockLevel::new(3)).unwrap();
//! assert_eq!(plan, AddPlan::Insert);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddPlan, Cart};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Namespace prefix used by the web storefront for its local storage keys.
pub const DEFAULT_STORAGE_NAMESPACE: &str = "@RocketShoes";

/// Key (inside the namespace) holding the JSON-encoded cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Builds a namespaced storage key, e.g. `@RocketShoes:cart`.
pub fn storage_key(namespace: &str, key: &str) -> String {
    format!("{}:{}", namespace, key)
}
