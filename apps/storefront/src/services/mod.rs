//! # Collaborator Services
//!
//! The cart's external collaborators, as traits, plus their implementations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Collaborators                                   │
//! │                                                                         │
//! │  Trait            Question it answers          Implementation           │
//! │  ─────            ───────────────────          ──────────────           │
//! │  StockService     how many of product N?       ApiClient (HTTP)         │
//! │  ProductCatalog   what is product N?           ApiClient (HTTP)         │
//! │  Notifier         tell the shopper something   Channel /                │
//! │                                                Recording notifiers      │
//! │                                                                         │
//! │  PersistentStore lives in rocketshoes-store.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod http;
pub mod notifier;

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, StockLevel};
use thiserror::Error;

pub use http::ApiClient;
pub use notifier::{ChannelNotifier, RecordingNotifier};

// =============================================================================
// Traits
// =============================================================================

/// Current stock level per product. Looked up on every mutation.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn stock(&self, id: ProductId) -> ServiceResult<StockLevel>;
}

/// Product metadata per product.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, id: ProductId) -> ServiceResult<Product>;
}

/// User-visible error messages (toasts). Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

// =============================================================================
// Errors
// =============================================================================

/// Collaborator failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure (connect, timeout, body decode).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint has no such resource.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: ProductId },

    /// Any other non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The catalog answered with a different product.
    #[error("Requested product {requested}, catalog returned {returned}")]
    UnexpectedProduct {
        requested: ProductId,
        returned: ProductId,
    },

    /// The configured base URL can't be used.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

/// Result type for collaborator calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
