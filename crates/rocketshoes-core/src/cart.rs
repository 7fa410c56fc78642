//! # Cart Rules
//!
//! The ordered cart and every rule that decides whether it may change.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Mutation Rules                                  │
//! │                                                                         │
//! │  Operation           Stock check                 Cart change            │
//! │  ─────────           ───────────                 ───────────            │
//! │                                                                         │
//! │  add (new id)    ──► stock ≥ 1 ─────────────────► push(amount = 1)     │
//! │                                                                         │
//! │  add (in cart)   ──► stock > amount ────────────► amount += 1          │
//! │                                                                         │
//! │  set amount n    ──► stock ≥ n, then present? ──► amount = n           │
//! │                                                                         │
//! │  remove          ──► (none), present? ──────────► items.remove(i)      │
//! │                                                                         │
//! │  Any failed check leaves the cart untouched.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart serializes as a bare JSON array of [`CartItem`] and validates
//! its invariants when deserialized.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, ProductId, StockLevel};
use crate::validation::validate_cart_items;

/// What adding a product to the cart requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPlan {
    /// Not in the cart yet: fetch product metadata and insert with amount 1.
    Insert,
    /// Already in the cart and stock allows one more.
    Increment,
}

/// The shopping cart.
///
/// ## Invariants
/// - Items keep insertion order
/// - Items are unique by `id`
/// - Every amount is at least 1
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from stored items, checking the invariants.
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        validate_cart_items(&items).map_err(|e| CoreError::InvalidCart(e.to_string()))?;
        Ok(Cart { items })
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up an item by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of unique items in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Add
    // =========================================================================

    /// Decides what adding `id` needs, given its current stock level.
    ///
    /// ## Behavior
    /// - Stock 0: out of stock, whether or not the product is in the cart
    /// - Not in cart: [`AddPlan::Insert`]
    /// - In cart with stock strictly above its amount: [`AddPlan::Increment`]
    /// - In cart with stock equal to (or below) its amount: out of stock
    pub fn plan_add(&self, id: ProductId, stock: StockLevel) -> CoreResult<AddPlan> {
        let current = self.get(id).map(|i| i.amount).unwrap_or(0);

        if stock.is_out() {
            return Err(out_of_stock(id, stock, current.saturating_add(1)));
        }

        match self.get(id) {
            None => Ok(AddPlan::Insert),
            Some(item) if stock.amount() > item.amount => Ok(AddPlan::Increment),
            Some(item) => Err(out_of_stock(id, stock, item.amount.saturating_add(1))),
        }
    }

    /// Appends a new item.
    ///
    /// Fails if the product is already in the cart or the amount is zero.
    pub fn insert(&mut self, item: CartItem) -> CoreResult<()> {
        if item.amount == 0 || !item.id.is_valid() {
            return Err(CoreError::InvalidCart(format!(
                "item {} must have a positive id and amount",
                item.id
            )));
        }

        if self.contains(item.id) {
            return Err(CoreError::InvalidCart(format!(
                "product {} is already in the cart",
                item.id
            )));
        }

        self.items.push(item);
        Ok(())
    }

    /// Adds one unit of a product already in the cart.
    ///
    /// ## Returns
    /// The new amount.
    pub fn increment(&mut self, id: ProductId, stock: StockLevel) -> CoreResult<u32> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;

        if stock.amount() <= item.amount {
            return Err(out_of_stock(id, stock, item.amount.saturating_add(1)));
        }

        item.amount += 1;
        Ok(item.amount)
    }

    // =========================================================================
    // Remove / Update
    // =========================================================================

    /// Removes an item by product id.
    pub fn remove(&mut self, id: ProductId) -> CoreResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;

        Ok(self.items.remove(index))
    }

    /// Sets the amount of an item.
    ///
    /// Stock is checked before presence: an out-of-stock amount is reported
    /// as such even for a product that is not in the cart.
    pub fn set_amount(&mut self, id: ProductId, amount: u32, stock: StockLevel) -> CoreResult<()> {
        if amount == 0 {
            return Err(CoreError::InvalidCart(format!(
                "amount of product {} must be positive",
                id
            )));
        }

        if !stock.covers(amount) {
            return Err(out_of_stock(id, stock, amount));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CoreError::ItemNotInCart(id))?;

        item.amount = amount;
        Ok(())
    }
}

fn out_of_stock(id: ProductId, stock: StockLevel, requested: u32) -> CoreError {
    CoreError::OutOfStock {
        product_id: id,
        available: stock.amount(),
        requested,
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = CoreError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        Cart::from_items(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
