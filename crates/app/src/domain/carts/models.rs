//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{
        products::models::{Product, ProductUuid},
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// The storage row only; items are loaded and reconciled separately.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// CartItem Model
///
/// `product_uuid` is a weak reference: the product may be deactivated or
/// deleted out from under the item, which makes the item invalid at the next
/// reconciliation. `unit_price` is the product price at add time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// A cart item paired with its resolved product.
///
/// `product` is `None` when the item is invalid: the product no longer
/// resolves or is inactive. Invalid items never contribute to totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledCartItem {
    pub item: CartItem,
    pub product: Option<Product>,
}

impl ReconciledCartItem {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.product.is_some()
    }
}

/// A cart as returned to callers: every item flagged valid or invalid, with
/// `subtotal` and `item_count` derived from the valid items on read.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledCart {
    pub uuid: CartUuid,
    pub items: Vec<ReconciledCartItem>,
    pub subtotal: u64,
    pub item_count: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of explicitly purging invalid items from a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct PurgedCart {
    pub items_removed: u64,
    pub cart: ReconciledCart,
}

/// Counts from a batch cleanup pass over all carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupSummary {
    pub carts_updated: u64,
    pub items_removed: u64,
}
