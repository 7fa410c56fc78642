//! # RocketShoes Storefront
//!
//! The shopping cart of the RocketShoes storefront: the session's
//! [`CartStore`], its collaborators and a command-line front end.
//!
//! ## Module Organization
//! ```text
//! rocketshoes_storefront/
//! ├── lib.rs          ◄─── You are here (wiring & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore (single writer, snapshot channel)
//! │   └── config.rs   ◄─── StorefrontConfig (file + environment)
//! ├── services/
//! │   ├── mod.rs      ◄─── StockService, ProductCatalog, Notifier traits
//! │   ├── http.rs     ◄─── ApiClient (reqwest)
//! │   └── notifier.rs ◄─── Channel / recording notifiers
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── get_cart, add_product, remove_product, ...
//! ├── cli.rs          ◄─── clap definitions for the `rocketshoes` binary
//! ├── messages.rs     ◄─── Localized user messages
//! └── error.rs        ◄─── CartError, ApiError, StartupError
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration
//! 3. Open the storage backend (SQLite file or memory) and check it answers
//! 4. Build the HTTP client for stock and catalog
//! 5. Open the CartStore (loads the persisted cart)

pub mod cli;
pub mod commands;
pub mod error;
pub mod messages;
pub mod services;
pub mod state;

use std::sync::Arc;

use rocketshoes_store::{
    CartRepository, Database, DbConfig, MemoryStore, PersistentStore, StoreError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::{ApiError, CartError, CartOperation, ErrorCode, StartupError};
pub use messages::{Locale, Messages};
pub use services::{ApiClient, Notifier, ProductCatalog, ServiceError, StockService};
pub use state::{CartStore, MutationOutcome, StorageBackend, StorefrontConfig};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,rocketshoes=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocketshoes=trace` - Show trace for rocketshoes crates only
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Wires collaborators and opens the cart for a session.
pub async fn build_store(
    config: &StorefrontConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<CartStore, StartupError> {
    let api = Arc::new(ApiClient::new(&config.api.base_url, config.api.timeout())?);
    info!(base_url = %api.base_url(), "API client ready");

    let kv: Arc<dyn PersistentStore> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory cart storage");
            Arc::new(MemoryStore::new())
        }
        StorageBackend::Sqlite => {
            let path = config.database_path();
            info!(?path, "Opening cart database");
            let db = Database::new(DbConfig::new(&path)).await?;
            if !db.health_check().await {
                return Err(StoreError::ConnectionFailed(format!(
                    "cart database at {} is not answering queries",
                    path.display()
                ))
                .into());
            }
            Arc::new(db.key_values())
        }
    };

    let carts = CartRepository::new(kv, &config.storage.namespace);
    let store = CartStore::open(
        api.clone(),
        api,
        notifier,
        carts,
        Messages::for_locale(config.messages.locale),
    )
    .await?;

    Ok(store)
}
