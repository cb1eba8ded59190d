//! Order Models

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order Model
///
/// Line items are copied from the catalog at placement time; later product
/// changes never reach back into an order. Only the two status fields are
/// mutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub user_uuid: UserUuid,
    pub items: Vec<OrderItem>,
    pub billing_address: Address,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub subtotal: u64,
    pub tax: u64,
    pub shipping_cost: u64,
    pub discount: u64,
    pub total: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Model
///
/// `product_uuid` is a plain snapshot reference, not a foreign key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub product_uuid: ProductUuid,
    pub name: String,
    pub sku: String,
    pub image: Option<String>,
    pub price: u64,
    pub quantity: u32,
}

/// New Order Model
///
/// Shipping defaults to the billing address when omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub billing_address: Address,
    pub shipping_address: Option<Address>,
}

/// Admin status assignment; unset fields keep their current value.
/// Deliberately unchecked against the customer cancellation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStatusUpdate {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Postal address, stored on the order as a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub phone: Option<String>,
}

/// A required address field was blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required address field: {field}")]
pub struct InvalidAddress {
    pub field: &'static str,
}

impl Address {
    /// Checks that the required fields are present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns the first blank required field.
    pub fn validate(&self) -> Result<(), InvalidAddress> {
        let required = [
            ("name", &self.name),
            ("line1", &self.line1),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(InvalidAddress { field });
            }
        }

        Ok(())
    }
}

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Storage representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Returned => "returned",
        }
    }

    /// Whether a customer may still cancel an order in this state. Shipped,
    /// delivered, cancelled, and returned orders are past the point of no
    /// return.
    #[must_use]
    pub const fn is_customer_cancellable(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Processing)
    }
}

/// Error parsing a stored status value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status value")]
pub struct ParseStatusError;

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            "returned" => Ok(Self::Returned),
            _ => Err(ParseStatusError),
        }
    }
}

/// Payment lifecycle states for the manual payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    /// Storage representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// The payment status after a customer cancellation: completed payments
    /// are marked for manual refund processing, everything else stays.
    #[must_use]
    pub const fn on_cancel(self) -> Self {
        match self {
            Self::Completed => Self::Refunded,
            other => other,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(ParseStatusError),
        }
    }
}

/// Payment methods. The storefront only supports the manual QR transfer
/// flow; no gateway is ever called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    QrTransfer,
}

impl PaymentMethod {
    /// Storage representation of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QrTransfer => "qr_transfer",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "qr_transfer" => Ok(Self::QrTransfer),
            _ => Err(ParseStatusError),
        }
    }
}
