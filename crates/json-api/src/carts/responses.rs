//! Cart response shapes, shared by every cart handler.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::{
    carts::models::{ReconciledCart, ReconciledCartItem},
    products::models::Product,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The items in cart order; invalid items carry a `null` product
    pub items: Vec<CartItemResponse>,

    /// Sum of `unit_price * quantity` over the valid items only
    pub subtotal: u64,

    /// Total unit count over the valid items only
    pub item_count: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<ReconciledCart> for CartResponse {
    fn from(cart: ReconciledCart) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            subtotal: cart.subtotal,
            item_count: cart.item_count,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The product the item refers to
    pub product_uuid: Uuid,

    /// Units of the product in the cart
    pub quantity: u32,

    /// Product price at the time the item was added
    pub unit_price: u64,

    /// The resolved product; `null` marks the item invalid
    pub product: Option<CartProductResponse>,

    /// The date and time the item was created
    pub created_at: String,

    /// The date and time the item was last updated
    pub updated_at: String,
}

impl From<ReconciledCartItem> for CartItemResponse {
    fn from(entry: ReconciledCartItem) -> Self {
        Self {
            uuid: entry.item.uuid.into_uuid(),
            product_uuid: entry.item.product_uuid.into_uuid(),
            quantity: entry.item.quantity,
            unit_price: entry.item.unit_price,
            product: entry.product.map(CartProductResponse::from),
            created_at: entry.item.created_at.to_string(),
            updated_at: entry.item.updated_at.to_string(),
        }
    }
}

/// Product summary embedded in cart items
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product display name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Product image reference
    pub image: Option<String>,

    /// Current catalog price
    pub price: u64,

    /// Units currently in stock
    pub stock: u32,

    /// Whether the product is purchasable
    pub is_active: bool,
}

impl From<Product> for CartProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            sku: product.sku,
            image: product.image,
            price: product.price,
            stock: product.stock,
            is_active: product.is_active,
        }
    }
}
