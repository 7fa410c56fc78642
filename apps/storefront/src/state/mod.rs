//! # State Module
//!
//! Long-lived storefront state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │         CartStore            │   │      StorefrontConfig        │   │
//! │  │                              │   │                              │   │
//! │  │  write_lock: Mutex<()>       │   │  api / storage / messages    │   │
//! │  │  snapshot: watch<Arc<Cart>>  │   │  read-only after load        │   │
//! │  │  collaborators (dyn traits)  │   │                              │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Mutations are serialized by the write lock                          │
//! │  • Readers clone an Arc of the last committed cart                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::{CartStore, MutationOutcome};
pub use config::{
    ApiSettings, ConfigError, ConfigResult, MessageSettings, StorageBackend, StorageSettings,
    StorefrontConfig, CONFIG_FILE_NAME,
};
