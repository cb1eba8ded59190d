//! Carts

pub mod errors;
pub mod models;
pub(crate) mod reconcile;
pub(crate) mod repositories;
pub mod service;
pub(crate) mod stock;

pub use errors::CartsServiceError;
pub use service::*;
