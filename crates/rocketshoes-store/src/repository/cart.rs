//! # Cart Repository
//!
//! Reads and writes the cart as one JSON array under a namespaced key.
//!
//! ## Load Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.get("@RocketShoes:cart")                                        │
//! │       │                                                                 │
//! │       ├── None ──────────────────────────────► empty cart              │
//! │       │                                                                 │
//! │       ├── not JSON / wrong shape / amount 0 /                          │
//! │       │   duplicate ids ──────── warn! ──────► empty cart              │
//! │       │                                                                 │
//! │       └── valid array ───────────────────────► Cart                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use rocketshoes_core::{storage_key, Cart, CART_STORAGE_KEY};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::kv::PersistentStore;

/// Repository for the persisted cart.
#[derive(Clone)]
pub struct CartRepository {
    store: Arc<dyn PersistentStore>,
    key: String,
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartRepository {
    /// Creates a repository storing the cart under `{namespace}:cart`.
    pub fn new(store: Arc<dyn PersistentStore>, namespace: &str) -> Self {
        CartRepository {
            store,
            key: storage_key(namespace, CART_STORAGE_KEY),
        }
    }

    /// The full storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored cart.
    ///
    /// An absent or malformed blob yields an empty cart; only a failing
    /// store is an error.
    pub async fn load(&self) -> StoreResult<Cart> {
        let Some(raw) = self.store.get(&self.key).await? else {
            debug!(key = %self.key, "No stored cart, starting empty");
            return Ok(Cart::new());
        };

        match decode(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, items = cart.item_count(), "Loaded stored cart");
                Ok(cart)
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Stored cart is malformed, starting empty");
                Ok(Cart::new())
            }
        }
    }

    /// Persists the whole cart, replacing the stored blob.
    pub async fn save(&self, cart: &Cart) -> StoreResult<()> {
        let encoded = encode(cart)?;
        self.store.set(&self.key, &encoded).await?;
        debug!(key = %self.key, items = cart.item_count(), "Cart persisted");
        Ok(())
    }
}

/// Encodes a cart the way it is stored: a compact JSON array.
pub fn encode(cart: &Cart) -> StoreResult<String> {
    Ok(serde_json::to_string(cart)?)
}

/// Decodes a stored blob, checking the cart invariants.
pub fn decode(raw: &str) -> Result<Cart, serde_json::Error> {
    serde_json::from_str(raw)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::pool::{Database, DbConfig};
    use rocketshoes_core::{CartItem, ProductId, DEFAULT_STORAGE_NAMESPACE};

    fn cart_with(id: i64, amount: u32) -> Cart {
        Cart::from_items(vec![CartItem {
            id: ProductId::new(id).unwrap(),
            name: "Tênis de Caminhada".to_string(),
            price: 179.9,
            image: "https://cdn.example/shoe.jpg".to_string(),
            amount,
            extra: Default::default(),
        }])
        .unwrap()
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let repo = CartRepository::new(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_NAMESPACE);
        assert_eq!(repo.key(), "@RocketShoes:cart");
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_is_empty() {
        for raw in ["not json", "{}", r#"[{"id": 1}]"#, r#"[{"id":1,"name":"A","price":1,"image":"","amount":0}]"#] {
            let store = MemoryStore::new();
            store.set("@RocketShoes:cart", raw).await.unwrap();
            let repo = CartRepository::new(Arc::new(store), DEFAULT_STORAGE_NAMESPACE);
            assert!(repo.load().await.unwrap().is_empty(), "raw: {}", raw);
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = Arc::new(MemoryStore::new());
        let repo = CartRepository::new(store.clone(), "@Test");
        let cart = cart_with(3, 2);

        repo.save(&cart).await.unwrap();

        assert_eq!(store.get("@Test:cart").await.unwrap().unwrap(), encode(&cart).unwrap());
        assert_eq!(repo.load().await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_sqlite_backend() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = CartRepository::new(Arc::new(db.key_values()), DEFAULT_STORAGE_NAMESPACE);
        let cart = cart_with(1, 4);

        repo.save(&cart).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), cart);
    }
}
