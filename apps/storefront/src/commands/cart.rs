//! # Cart Commands
//!
//! Cart reads and mutations with structured responses.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Commands                                        │
//! │                                                                         │
//! │  raw input (i64)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductId::new ── invalid ──► notify + ApiError(VALIDATION_ERROR)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore::try_* ── Err ────► notify + ApiError(code, message)        │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  CartResponse { items, summary }                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocketshoes_core::{AmountUpdate, Cart, CartItem, CoreError, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, CartError, CartOperation};
use crate::state::CartStore;

/// Cart response including items and a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}

/// Counts shown next to the cart icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Distinct products
    pub item_count: usize,

    /// Sum of amounts
    pub total_quantity: u64,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            summary: CartSummary {
                item_count: cart.item_count(),
                total_quantity: cart.total_quantity(),
            },
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &CartStore) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(store.snapshot().as_ref())
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Not in cart and in stock: added with amount 1
/// - In cart and stock above its amount: amount + 1
/// - Otherwise: out of stock, cart unchanged
pub async fn add_product(store: &CartStore, product_id: i64) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_product command");
    let op = CartOperation::Add;

    let id = parse_id(store, op, product_id)?;
    let result = store.try_add_product(id).await;
    respond(store, op, result)
}

/// Removes a product from the cart.
pub async fn remove_product(
    store: &CartStore,
    product_id: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "remove_product command");
    let op = CartOperation::Remove;

    let id = parse_id(store, op, product_id)?;
    let result = store.try_remove_product(id).await;
    respond(store, op, result)
}

/// Sets the amount of a product already in the cart.
///
/// A non-positive `amount` is ignored: the current cart comes back and
/// nobody is notified.
pub async fn update_product_amount(
    store: &CartStore,
    product_id: i64,
    amount: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, amount, "update_product_amount command");
    let op = CartOperation::Update;

    if amount <= 0 {
        return Ok(get_cart(store));
    }

    let id = parse_id(store, op, product_id)?;
    let result = store
        .try_update_product_amount(AmountUpdate {
            product_id: id,
            amount,
        })
        .await;
    respond(store, op, result)
}

fn parse_id(store: &CartStore, op: CartOperation, raw: i64) -> Result<ProductId, ApiError> {
    ProductId::new(raw).map_err(|e| fail(store, op, CartError::from(CoreError::from(e))))
}

fn respond<T>(
    store: &CartStore,
    op: CartOperation,
    result: Result<T, CartError>,
) -> Result<CartResponse, ApiError> {
    match result {
        Ok(_) => Ok(get_cart(store)),
        Err(err) => Err(fail(store, op, err)),
    }
}

fn fail(store: &CartStore, op: CartOperation, err: CartError) -> ApiError {
    store.report(op, &err);
    ApiError::from_cart(&err, op, store.messages())
}
