//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => {
            StatusError::bad_request().brief("Cart has no valid items")
        }
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::InvalidTransition { from } => StatusError::bad_request().brief(
            format!("Order in status {} cannot be cancelled", from.as_str()),
        ),
        OrdersServiceError::InsufficientStock { product } => StatusError::bad_request()
            .brief(format!("Insufficient stock for product {product}")),
        OrdersServiceError::InvalidAddress(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
