//! # rocketshoes-store: Persistence Layer for the RocketShoes Cart
//!
//! The web storefront keeps its cart as a JSON blob in browser local
//! storage. This crate provides the same contract (a string-keyed store of
//! string values) behind the [`PersistentStore`] trait, with a SQLite and
//! an in-memory backend, plus the [`CartRepository`] that reads and writes
//! the cart blob.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  CartStore (storefront app)                                            │
//! │       │  load() at session start, save(&cart) after each mutation      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                rocketshoes-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ CartRepository│    │PersistentStore│    │  Migrations  │  │   │
//! │  │   │               │───►│               │    │  (embedded)  │  │   │
//! │  │   │ JSON encode   │    │ MemoryStore   │    │              │  │   │
//! │  │   │ + fallback    │    │ KeyValueRepo  │    │ 001_kv.sql   │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                     SQLite: key_value(key, value)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rocketshoes_store::{CartRepository, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("cart.db")).await?;
//! let carts = CartRepository::new(Arc::new(db.key_values()), "@RocketShoes");
//!
//! let cart = carts.load().await?; // empty when absent or malformed
//! carts.save(&cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{MemoryStore, PersistentStore};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::key_value::KeyValueRepository;
