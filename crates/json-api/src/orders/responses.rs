//! Order request/response shapes, shared by the order handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::models::{Address, Order, OrderItem};

/// Postal address payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressPayload {
    /// Recipient name
    pub name: String,

    /// First address line
    pub line1: String,

    /// Second address line
    #[serde(default)]
    pub line2: Option<String>,

    /// City
    pub city: String,

    /// Region, state, or province
    #[serde(default)]
    pub region: String,

    /// Postal code
    pub postal_code: String,

    /// Country code
    pub country: String,

    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Address {
            name: payload.name,
            line1: payload.line1,
            line2: payload.line2,
            city: payload.city,
            region: payload.region,
            postal_code: payload.postal_code,
            country: payload.country,
            phone: payload.phone,
        }
    }
}

impl From<Address> for AddressPayload {
    fn from(address: Address) -> Self {
        Self {
            name: address.name,
            line1: address.line1,
            line2: address.line2,
            city: address.city,
            region: address.region,
            postal_code: address.postal_code,
            country: address.country,
            phone: address.phone,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Human-readable order number
    pub order_number: String,

    /// Line item snapshots taken at placement time
    pub items: Vec<OrderItemResponse>,

    /// Billing address
    pub billing_address: AddressPayload,

    /// Shipping address
    pub shipping_address: AddressPayload,

    /// Payment method
    pub payment_method: String,

    /// Payment lifecycle state
    pub payment_status: String,

    /// Order lifecycle state
    pub order_status: String,

    /// Sum of cart prices at add time
    pub subtotal: u64,

    /// Tax (fixed at zero)
    pub tax: u64,

    /// Shipping cost (fixed at zero)
    pub shipping_cost: u64,

    /// Discount (fixed at zero)
    pub discount: u64,

    /// Grand total
    pub total: u64,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            order_number: order.order_number,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            billing_address: order.billing_address.into(),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            order_status: order.order_status.as_str().to_string(),
            subtotal: order.subtotal,
            tax: order.tax,
            shipping_cost: order.shipping_cost,
            discount: order.discount,
            total: order.total,
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the line item
    pub uuid: Uuid,

    /// Snapshot reference to the ordered product
    pub product_uuid: Uuid,

    /// Product name at placement time
    pub name: String,

    /// Product SKU at placement time
    pub sku: String,

    /// Product image at placement time
    pub image: Option<String>,

    /// Product price at placement time
    pub price: u64,

    /// Units ordered
    pub quantity: u32,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            name: item.name,
            sku: item.sku,
            image: item.image,
            price: item.price,
            quantity: item.quantity,
        }
    }
}
