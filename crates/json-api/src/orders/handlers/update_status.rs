//! Admin Order Status Handler

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

use storefront_app::domain::orders::models::OrderStatusUpdate;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// New order status; omitted fields keep their current value
    #[serde(default)]
    pub order_status: Option<String>,

    /// New payment status
    #[serde(default)]
    pub payment_status: Option<String>,
}

impl TryFrom<UpdateOrderStatusRequest> for OrderStatusUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateOrderStatusRequest) -> Result<Self, Self::Error> {
        let order_status = request
            .order_status
            .map(|value| value.parse())
            .transpose()
            .map_err(|_ignored| StatusError::bad_request().brief("Unknown order status"))?;

        let payment_status = request
            .payment_status
            .map(|value| value.parse())
            .transpose()
            .map_err(|_ignored| StatusError::bad_request().brief("Unknown payment status"))?;

        Ok(OrderStatusUpdate {
            order_status,
            payment_status,
        })
    }
}

/// Update Order Status Handler
///
/// Admin operational override: assigns statuses directly, with no
/// transition checks.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status value"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let update: OrderStatusUpdate = json.into_inner().try_into()?;

    let updated = state
        .app
        .orders
        .set_status(order.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
