//! Purge Invalid Cart Items Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_status_error, carts::responses::CartResponse, extensions::*, state::State};

/// Purged Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurgedCartResponse {
    /// Number of invalid items removed by this call
    pub items_removed: u64,

    /// The cart after the purge
    pub cart: CartResponse,
}

/// Purge Invalid Cart Items Handler
///
/// Removes every item whose product no longer resolves or is inactive.
/// Running it again with no catalog change removes nothing.
#[endpoint(
    tags("carts"),
    summary = "Purge Invalid Cart Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Invalid items purged"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PurgedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let purged = state
        .app
        .carts
        .purge_invalid_items(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PurgedCartResponse {
        items_removed: purged.items_removed,
        cart: purged.cart.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{
        MockCartsService,
        models::{CartUuid, PurgedCart},
    };

    use crate::test_helpers::{TEST_USER, carts_service, make_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("cart/invalid-items").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_purge_reports_removed_count() -> TestResult {
        let purged = PurgedCart {
            items_removed: 2,
            cart: make_cart(CartUuid::new()),
        };

        let mut carts = MockCartsService::new();

        carts
            .expect_purge_invalid_items()
            .once()
            .withf(|user| *user == TEST_USER.uuid)
            .return_once(move |_| Ok(purged));

        let mut res = TestClient::delete("http://example.com/cart/invalid-items")
            .send(&make_service(carts))
            .await;

        let body: PurgedCartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items_removed, 2);

        Ok(())
    }
}
