//! Product response shapes.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::Product;

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product display name
    pub name: String,

    /// Stock keeping unit
    pub sku: String,

    /// Product image reference
    pub image: Option<String>,

    /// Price in minor currency units
    pub price: u64,

    /// Units currently in stock
    pub stock: u32,

    /// Whether the product is purchasable
    pub is_active: bool,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            name: product.name,
            sku: product.sku,
            image: product.image,
            price: product.price,
            stock: product.stock,
            is_active: product.is_active,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
