//! # Cart State
//!
//! The session's cart: one writer at a time, any number of readers.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Mutation                                   │
//! │                                                                         │
//! │  add_product(id)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  write_lock.lock().await ◄── concurrent mutations queue here            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clone current snapshot ──► StockService ──► Cart rules (core)          │
//! │       │                     ProductCatalog        │                     │
//! │       │                                           ▼                     │
//! │       │                                  next cart (not visible yet)    │
//! │       ▼                                           │                     │
//! │  CartRepository::save(next) ──── Err ──► notify, nothing changed        │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  snapshot.send_replace(next) ──► readers / subscribers see it           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The write lock is held across the stock, catalog and storage awaits.
//! Readers never take it: [`CartStore::snapshot`] clones the `Arc` of the
//! last committed cart.

use std::sync::Arc;

use rocketshoes_core::validation::validate_requested_amount;
use rocketshoes_core::{AddPlan, AmountUpdate, Cart, CartItem, ProductId};
use rocketshoes_store::{CartRepository, StoreResult};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::{CartError, CartOperation, CartResult};
use crate::messages::Messages;
use crate::services::{Notifier, ProductCatalog, StockService};

/// What a successful mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Product added (amount 1) or incremented to `amount`.
    Added { id: ProductId, amount: u32 },

    /// Product removed from the cart.
    Removed(ProductId),

    /// Amount set.
    Updated { id: ProductId, amount: u32 },

    /// Nothing to do (non-positive amount update).
    Ignored,
}

/// Owner of the session's cart.
pub struct CartStore {
    stock: Arc<dyn StockService>,
    catalog: Arc<dyn ProductCatalog>,
    notifier: Arc<dyn Notifier>,
    carts: CartRepository,
    messages: Messages,
    write_lock: Mutex<()>,
    snapshot: watch::Sender<Arc<Cart>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.carts.key())
            .field("items", &self.snapshot.borrow().item_count())
            .finish()
    }
}

impl CartStore {
    /// Creates the store, loading the persisted cart.
    ///
    /// A missing or malformed stored cart starts empty; only a failing
    /// store is an error.
    pub async fn open(
        stock: Arc<dyn StockService>,
        catalog: Arc<dyn ProductCatalog>,
        notifier: Arc<dyn Notifier>,
        carts: CartRepository,
        messages: Messages,
    ) -> StoreResult<Self> {
        let cart = carts.load().await?;
        info!(key = %carts.key(), items = cart.item_count(), "Cart session opened");

        let (snapshot, _) = watch::channel(Arc::new(cart));

        Ok(CartStore {
            stock,
            catalog,
            notifier,
            carts,
            messages,
            write_lock: Mutex::new(()),
            snapshot,
        })
    }

    /// The last committed cart.
    pub fn snapshot(&self) -> Arc<Cart> {
        self.snapshot.borrow().clone()
    }

    /// Receiver observing every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.snapshot.subscribe()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    // =========================================================================
    // Operations (notify on failure)
    // =========================================================================

    /// Adds one unit of a product, inserting it if absent.
    ///
    /// Failures are reported through the notifier, never returned.
    pub async fn add_product(&self, id: ProductId) {
        if let Err(err) = self.try_add_product(id).await {
            self.report(CartOperation::Add, &err);
        }
    }

    /// Removes a product from the cart.
    pub async fn remove_product(&self, id: ProductId) {
        if let Err(err) = self.try_remove_product(id).await {
            self.report(CartOperation::Remove, &err);
        }
    }

    /// Sets a product's amount. Non-positive amounts are ignored silently.
    pub async fn update_product_amount(&self, update: AmountUpdate) {
        if let Err(err) = self.try_update_product_amount(update).await {
            self.report(CartOperation::Update, &err);
        }
    }

    /// Logs a failure and shows the shopper its message.
    pub fn report(&self, op: CartOperation, err: &CartError) {
        warn!(operation = %op, error = %err, "Cart operation failed");
        self.notifier.error(err.user_message(op, &self.messages));
    }

    // =========================================================================
    // Operations (structured results)
    // =========================================================================

    /// Adds one unit of a product and returns what changed.
    pub async fn try_add_product(&self, id: ProductId) -> CartResult<MutationOutcome> {
        let _guard = self.write_lock.lock().await;
        let current = self.snapshot();

        let stock = self.stock.stock(id).await?;
        let mut next = Cart::clone(&current);

        let amount = match current.plan_add(id, stock)? {
            AddPlan::Insert => {
                let product = self.catalog.product(id).await?;
                next.insert(CartItem::from_product(product))?;
                1
            }
            AddPlan::Increment => next.increment(id, stock)?,
        };

        self.commit(next).await?;
        debug!(product_id = %id, amount, "Product added to cart");
        Ok(MutationOutcome::Added { id, amount })
    }

    /// Removes a product; fails with `ItemNotInCart` when it is absent.
    pub async fn try_remove_product(&self, id: ProductId) -> CartResult<MutationOutcome> {
        let _guard = self.write_lock.lock().await;
        let mut next = Cart::clone(&self.snapshot());

        next.remove(id)?;

        self.commit(next).await?;
        debug!(product_id = %id, "Product removed from cart");
        Ok(MutationOutcome::Removed(id))
    }

    /// Sets a product's amount after checking stock.
    pub async fn try_update_product_amount(
        &self,
        update: AmountUpdate,
    ) -> CartResult<MutationOutcome> {
        let Some(amount) = validate_requested_amount(update.amount) else {
            debug!(product_id = %update.product_id, amount = update.amount, "Ignoring non-positive amount");
            return Ok(MutationOutcome::Ignored);
        };

        let id = update.product_id;
        let _guard = self.write_lock.lock().await;

        let stock = self.stock.stock(id).await?;
        let mut next = Cart::clone(&self.snapshot());
        next.set_amount(id, amount, stock)?;

        self.commit(next).await?;
        debug!(product_id = %id, amount, "Product amount updated");
        Ok(MutationOutcome::Updated { id, amount })
    }

    /// Persists `next`, then publishes it. Nothing is published if the
    /// save fails.
    async fn commit(&self, next: Cart) -> CartResult<()> {
        self.carts.save(&next).await?;
        self.snapshot.send_replace(Arc::new(next));
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use rocketshoes_core::{Product, StockLevel};
    use rocketshoes_store::{MemoryStore, PersistentStore, StoreError};

    use crate::services::{RecordingNotifier, ServiceError, ServiceResult};

    const OUT_OF_STOCK: &str = "Requested quantity out of stock";
    const KEY: &str = "@RocketShoes:cart";

    fn id(raw: i64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    /// Stock and catalog from fixed maps, counting stock lookups.
    #[derive(Default)]
    struct FakeApi {
        stock: HashMap<ProductId, u32>,
        products: HashMap<ProductId, Product>,
        stock_calls: AtomicUsize,
        delay: Option<Duration>,
    }

    impl FakeApi {
        fn with_stock(mut self, raw: i64, amount: u32) -> Self {
            self.stock.insert(id(raw), amount);
            self
        }

        fn with_product(mut self, raw: i64, name: &str) -> Self {
            self.products.insert(
                id(raw),
                Product {
                    id: id(raw),
                    name: name.to_string(),
                    price: 179.9,
                    image: format!("https://cdn.example/{}.jpg", raw),
                    extra: Default::default(),
                },
            );
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl StockService for FakeApi {
        async fn stock(&self, id: ProductId) -> ServiceResult<StockLevel> {
            self.stock_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.stock
                .get(&id)
                .map(|amount| StockLevel::new(*amount))
                .ok_or(ServiceError::NotFound {
                    resource: "Stock",
                    id,
                })
        }
    }

    #[async_trait]
    impl ProductCatalog for FakeApi {
        async fn product(&self, id: ProductId) -> ServiceResult<Product> {
            self.products.get(&id).cloned().ok_or(ServiceError::NotFound {
                resource: "Product",
                id,
            })
        }
    }

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    #[async_trait]
    impl PersistentStore for FlakyStore {
        async fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Internal("disk full".to_string()));
            }
            self.inner.set(key, value).await
        }
    }

    struct Harness {
        store: CartStore,
        api: Arc<FakeApi>,
        kv: Arc<FlakyStore>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Harness {
        async fn stored(&self) -> Option<String> {
            self.kv.get(KEY).await.unwrap()
        }
    }

    async fn harness(api: FakeApi, stored: Option<&str>) -> Harness {
        let api = Arc::new(api);
        let kv = Arc::new(FlakyStore::default());
        if let Some(raw) = stored {
            kv.set(KEY, raw).await.unwrap();
        }
        let notifier = Arc::new(RecordingNotifier::new());

        let store = CartStore::open(
            api.clone(),
            api.clone(),
            notifier.clone(),
            CartRepository::new(kv.clone(), "@RocketShoes"),
            Messages::default(),
        )
        .await
        .unwrap();

        Harness {
            store,
            api,
            kv,
            notifier,
        }
    }

    fn stored_item(raw: i64, amount: u32) -> String {
        format!(
            r#"{{"id":{raw},"name":"Product {raw}","price":99.9,"image":"https://cdn.example/{raw}.jpg","amount":{amount}}}"#
        )
    }

    // -------------------------------------------------------------------------
    // add_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_with_zero_stock_is_out_of_stock() {
        let h = harness(FakeApi::default().with_stock(7, 0).with_product(7, "Shoe"), None).await;

        h.store.add_product(id(7)).await;

        assert!(h.store.snapshot().is_empty());
        assert_eq!(h.notifier.messages(), vec![OUT_OF_STOCK]);
        assert_eq!(h.stored().await, None);
    }

    #[tokio::test]
    async fn test_add_new_product() {
        let h = harness(FakeApi::default().with_stock(7, 3).with_product(7, "Shoe"), None).await;

        h.store.add_product(id(7)).await;

        let cart = h.store.snapshot();
        assert_eq!(cart.item_count(), 1);
        let item = cart.get(id(7)).unwrap();
        assert_eq!(item.name, "Shoe");
        assert_eq!(item.amount, 1);
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_increments_while_stock_allows() {
        let stored = format!("[{}]", stored_item(1, 1));
        let h = harness(FakeApi::default().with_stock(1, 2), Some(&stored)).await;

        let outcome = h.store.try_add_product(id(1)).await.unwrap();
        assert_eq!(outcome, MutationOutcome::Added { id: id(1), amount: 2 });

        // stock == amount now
        h.store.add_product(id(1)).await;
        assert_eq!(h.store.snapshot().get(id(1)).unwrap().amount, 2);
        assert_eq!(h.notifier.messages(), vec![OUT_OF_STOCK]);
    }

    #[tokio::test]
    async fn test_add_reports_catalog_failure_as_generic_error() {
        let h = harness(FakeApi::default().with_stock(9, 5), None).await;

        h.store.add_product(id(9)).await;

        assert!(h.store.snapshot().is_empty());
        assert_eq!(h.notifier.messages(), vec!["Error adding product"]);
    }

    #[tokio::test]
    async fn test_add_reports_stock_failure_as_generic_error() {
        let h = harness(FakeApi::default().with_product(9, "Boot"), None).await;

        h.store.add_product(id(9)).await;

        assert!(h.store.snapshot().is_empty());
        assert_eq!(h.notifier.messages(), vec!["Error adding product"]);
    }

    // -------------------------------------------------------------------------
    // remove_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remove_present_and_absent() {
        let stored = format!("[{},{}]", stored_item(1, 1), stored_item(2, 3));
        let h = harness(FakeApi::default(), Some(&stored)).await;

        h.store.remove_product(id(1)).await;
        let cart = h.store.snapshot();
        assert_eq!(cart.item_count(), 1);
        assert!(cart.contains(id(2)));

        h.store.remove_product(id(42)).await;
        assert_eq!(h.store.snapshot(), cart);
        assert_eq!(h.notifier.messages(), vec!["Error removing product"]);
    }

    // -------------------------------------------------------------------------
    // update_product_amount
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_non_positive_amount_is_silent() {
        let stored = format!("[{}]", stored_item(1, 2));
        let h = harness(FakeApi::default().with_stock(1, 5), Some(&stored)).await;

        for amount in [0, -3] {
            let outcome = h
                .store
                .try_update_product_amount(AmountUpdate {
                    product_id: id(1),
                    amount,
                })
                .await
                .unwrap();
            assert_eq!(outcome, MutationOutcome::Ignored);
        }

        assert_eq!(h.store.snapshot().get(id(1)).unwrap().amount, 2);
        assert_eq!(h.api.stock_calls.load(Ordering::SeqCst), 0);
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_update_beyond_stock_is_out_of_stock() {
        let stored = format!("[{}]", stored_item(1, 2));
        let h = harness(FakeApi::default().with_stock(1, 3), Some(&stored)).await;

        h.store
            .update_product_amount(AmountUpdate {
                product_id: id(1),
                amount: 4,
            })
            .await;

        assert_eq!(h.store.snapshot().get(id(1)).unwrap().amount, 2);
        assert_eq!(h.notifier.messages(), vec![OUT_OF_STOCK]);
    }

    #[tokio::test]
    async fn test_update_above_counter_range_is_out_of_stock() {
        let stored = format!("[{}]", stored_item(1, 2));
        let h = harness(FakeApi::default().with_stock(1, 5), Some(&stored)).await;

        for amount in [5_000_000_000, i64::MAX] {
            h.store
                .update_product_amount(AmountUpdate {
                    product_id: id(1),
                    amount,
                })
                .await;
        }

        assert_eq!(h.store.snapshot().get(id(1)).unwrap().amount, 2);
        assert_eq!(h.api.stock_calls.load(Ordering::SeqCst), 2);
        assert_eq!(h.notifier.messages(), vec![OUT_OF_STOCK, OUT_OF_STOCK]);
        assert_eq!(h.stored().await.unwrap(), format!("[{}]", stored_item(1, 2)));
    }

    #[tokio::test]
    async fn test_update_absent_product_is_generic_error() {
        let h = harness(FakeApi::default().with_stock(5, 10), None).await;

        h.store
            .update_product_amount(AmountUpdate {
                product_id: id(5),
                amount: 2,
            })
            .await;

        assert!(h.store.snapshot().is_empty());
        assert_eq!(h.notifier.messages(), vec!["Error updating product quantity"]);
    }

    #[tokio::test]
    async fn test_update_sets_amount() {
        let stored = format!("[{}]", stored_item(1, 2));
        let h = harness(FakeApi::default().with_stock(1, 5), Some(&stored)).await;

        h.store
            .update_product_amount(AmountUpdate {
                product_id: id(1),
                amount: 4,
            })
            .await;

        let cart = h.store.snapshot();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(id(1)).unwrap().amount, 4);
    }

    // -------------------------------------------------------------------------
    // Persistence and concurrency
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_stored_json_matches_snapshot_after_each_mutation() {
        let h = harness(
            FakeApi::default()
                .with_stock(1, 5)
                .with_product(1, "Runner")
                .with_product(2, "Trail")
                .with_stock(2, 1),
            None,
        )
        .await;

        h.store.add_product(id(1)).await;
        h.store.add_product(id(2)).await;
        h.store.add_product(id(1)).await;
        h.store
            .update_product_amount(AmountUpdate {
                product_id: id(1),
                amount: 5,
            })
            .await;
        h.store.remove_product(id(2)).await;

        let snapshot = h.store.snapshot();
        let stored = h.stored().await.unwrap();
        assert_eq!(stored, serde_json::to_string(snapshot.as_ref()).unwrap());
        assert_eq!(snapshot.get(id(1)).unwrap().amount, 5);
        assert!(h.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_stored_cart_starts_empty() {
        for raw in ["not json", r#"{"id":1}"#, "[{\"id\":1}]"] {
            let h = harness(FakeApi::default(), Some(raw)).await;
            assert!(h.store.snapshot().is_empty());
        }

        let duplicated = format!("[{},{}]", stored_item(1, 1), stored_item(1, 2));
        let h = harness(FakeApi::default(), Some(&duplicated)).await;
        assert!(h.store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_changes_nothing() {
        let stored = format!("[{}]", stored_item(1, 1));
        let h = harness(
            FakeApi::default().with_stock(1, 5).with_stock(2, 5).with_product(2, "Trail"),
            Some(&stored),
        )
        .await;
        let before = h.store.snapshot();
        h.kv.fail_writes.store(true, Ordering::SeqCst);

        h.store.add_product(id(1)).await;
        h.store.add_product(id(2)).await;
        h.store.remove_product(id(1)).await;

        assert_eq!(h.store.snapshot(), before);
        assert_eq!(h.stored().await.unwrap(), stored);
        assert_eq!(
            h.notifier.messages(),
            vec![
                "Error adding product",
                "Error adding product",
                "Error removing product"
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_serialized() {
        let stored = format!("[{}]", stored_item(1, 1));
        let h = harness(
            FakeApi::default()
                .with_stock(1, 5)
                .with_delay(Duration::from_millis(20)),
            Some(&stored),
        )
        .await;

        let (a, b) = tokio::join!(h.store.try_add_product(id(1)), h.store.try_add_product(id(1)));
        a.unwrap();
        b.unwrap();

        assert_eq!(h.store.snapshot().get(id(1)).unwrap().amount, 3);
    }

    #[tokio::test]
    async fn test_concurrent_adds_of_new_product_yield_two() {
        let h = harness(
            FakeApi::default()
                .with_stock(4, 5)
                .with_product(4, "Sneaker")
                .with_delay(Duration::from_millis(20)),
            None,
        )
        .await;

        tokio::join!(h.store.add_product(id(4)), h.store.add_product(id(4)));

        let cart = h.store.snapshot();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(id(4)).unwrap().amount, 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_carts() {
        let h = harness(FakeApi::default().with_stock(7, 3).with_product(7, "Shoe"), None).await;
        let mut rx = h.store.subscribe();

        h.store.add_product(id(7)).await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().item_count(), 1);

        // Rejected mutations publish nothing
        h.store.remove_product(id(99)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_portuguese_messages() {
        let api = Arc::new(FakeApi::default().with_stock(7, 0));
        let notifier = Arc::new(RecordingNotifier::new());
        let store = CartStore::open(
            api.clone(),
            api,
            notifier.clone(),
            CartRepository::new(Arc::new(MemoryStore::new()), "@RocketShoes"),
            Messages::for_locale(crate::messages::Locale::PtBr),
        )
        .await
        .unwrap();

        store.add_product(id(7)).await;
        assert_eq!(
            notifier.messages(),
            vec!["Quantidade solicitada fora de estoque"]
        );
    }
}
