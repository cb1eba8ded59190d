//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::models::ProductUpdate;

use crate::{
    extensions::*,
    products::{errors::into_status_error, responses::ProductResponse},
    state::State,
};

/// Update Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: u64,
    pub stock: u32,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

const fn default_is_active() -> bool {
    true
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            sku: request.sku,
            image: request.image,
            price: request.price,
            stock: request.stock,
            is_active: request.is_active,
        }
    }
}

/// Update Product Handler
///
/// Deactivating a product here is the lifecycle event the cart cleanup
/// reacts to: carts referencing it are scrubbed once the update commits.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty, is_active = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;
    let request = json.into_inner();
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("is_active", tracing::field::display(request.is_active));

    let deactivated = !request.is_active;

    let updated = state
        .app
        .products
        .update_product(product.into(), request.into())
        .await
        .map_err(into_status_error)?;

    if deactivated {
        let summary = state
            .app
            .carts
            .cleanup_products(&[updated.uuid])
            .await
            .map_err(crate::carts::errors::into_status_error)?;

        tracing::info!(
            product_uuid = %product,
            carts_updated = summary.carts_updated,
            items_removed = summary.items_removed,
            "removed deactivated product from carts"
        );
    }

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{MockCartsService, models::CleanupSummary},
        products::{MockProductsService, ProductsServiceError, models::ProductUuid},
    };

    use crate::test_helpers::{make_product, products_and_carts_service, products_service};

    use super::*;

    fn route() -> Router {
        Router::with_path("products/{product}").put(handler)
    }

    fn update_json(is_active: bool) -> serde_json::Value {
        json!({
            "name": "Widget",
            "sku": "WID-1",
            "price": 12_00,
            "stock": 4,
            "is_active": is_active
        })
    }

    #[tokio::test]
    async fn test_update_active_product_skips_cart_cleanup() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(uuid);

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |p, update| *p == uuid && update.is_active)
            .return_once(move |_, _| Ok(product));

        // The strict carts mock rejects any cleanup call.
        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&update_json(true))
            .send(&products_service(products, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivation_triggers_cart_cleanup() -> TestResult {
        let uuid = ProductUuid::new();

        let mut product = make_product(uuid);

        product.is_active = false;

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |p, update| *p == uuid && !update.is_active)
            .return_once(move |_, _| Ok(product));

        let mut carts = MockCartsService::new();

        carts
            .expect_cleanup_products()
            .once()
            .withf(move |uuids| uuids == [uuid].as_slice())
            .return_once(|_| {
                Ok(CleanupSummary {
                    carts_updated: 2,
                    items_removed: 2,
                })
            });

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&update_json(false))
            .send(&products_and_carts_service(products, carts, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_unknown_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{}", ProductUuid::new()))
            .json(&update_json(true))
            .send(&products_service(products, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
