//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::NewOrder;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::{AddressPayload, OrderResponse}},
    state::State,
};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    /// Billing address; also used for shipping when no shipping address is given
    pub billing_address: AddressPayload,

    /// Optional distinct shipping address
    #[serde(default)]
    pub shipping_address: Option<AddressPayload>,
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        NewOrder {
            billing_address: request.billing_address.into(),
            shipping_address: request.shipping_address.map(Into::into),
        }
    }
}

/// Place Order Handler
///
/// Snapshots the user's reconciled cart into an order and clears the cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart, invalid address, or insufficient stock"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, order_number = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));

    let order = state
        .app
        .orders
        .place_order(user.uuid, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("order_number", tracing::field::display(&order.order_number));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(order_number = %order.order_number, "placed order");

    Ok(Json(order.into()))
}
