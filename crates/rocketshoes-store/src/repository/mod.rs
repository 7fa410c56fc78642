//! # Repository Module
//!
//! Persistence repositories for the cart.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layers                                    │
//! │                                                                         │
//! │  CartStore                                                             │
//! │       │  carts.load() / carts.save(&cart)                              │
//! │       ▼                                                                 │
//! │  CartRepository          ← JSON encode/decode, namespaced key          │
//! │       │  store.get(key) / store.set(key, json)                         │
//! │       ▼                                                                 │
//! │  dyn PersistentStore     ← KeyValueRepository (SQLite) or MemoryStore  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CartRepository`](cart::CartRepository) - The persisted cart blob
//! - [`KeyValueRepository`](key_value::KeyValueRepository) - SQLite key/value table

pub mod cart;
pub mod key_value;
