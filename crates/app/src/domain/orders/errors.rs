//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    orders::models::{InvalidAddress, OrderStatus},
    products::models::ProductUuid,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart has no valid items")]
    EmptyCart,

    #[error("order not found")]
    NotFound,

    #[error("order in status {} cannot be cancelled", .from.as_str())]
    InvalidTransition { from: OrderStatus },

    #[error("insufficient stock for product {product}")]
    InsufficientStock { product: ProductUuid },

    #[error(transparent)]
    InvalidAddress(#[from] InvalidAddress),

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
