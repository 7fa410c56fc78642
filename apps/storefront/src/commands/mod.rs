//! # Commands Module
//!
//! Request/response entry points over a [`CartStore`](crate::state::CartStore).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! └── cart.rs     ◄─── Cart reads and mutations
//! ```
//!
//! Every command returns the cart as it stands afterwards, or an
//! [`ApiError`](crate::error::ApiError) carrying the message the shopper
//! was notified with. Callers are the CLI and any future UI bridge.

pub mod cart;

pub use cart::{
    add_product, get_cart, remove_product, update_product_amount, CartResponse, CartSummary,
};
