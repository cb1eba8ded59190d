//! Stock bound checks for cart mutations.
//!
//! Checks run at mutation time against the product row read in the same
//! transaction; carts capture purchase intent and never reserve stock.

use crate::domain::{carts::errors::CartsServiceError, products::models::Product};

/// Validates adding `requested` units on top of `existing` already-carted
/// units. Returns the combined quantity to store.
pub(crate) fn check_addition(
    product: &Product,
    existing: u32,
    requested: u32,
) -> Result<u32, CartsServiceError> {
    if requested < 1 {
        return Err(CartsServiceError::InvalidQuantity);
    }

    if !product.is_active {
        return Err(CartsServiceError::Unavailable);
    }

    let combined = existing.saturating_add(requested);

    if combined > product.stock {
        return Err(CartsServiceError::InsufficientStock {
            requested: combined,
            available: product.stock,
        });
    }

    Ok(combined)
}

/// Validates overwriting an item's quantity.
pub(crate) fn check_overwrite(product: &Product, quantity: u32) -> Result<(), CartsServiceError> {
    if quantity < 1 {
        return Err(CartsServiceError::InvalidQuantity);
    }

    if quantity > product.stock {
        return Err(CartsServiceError::InsufficientStock {
            requested: quantity,
            available: product.stock,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::products::models::{Product, ProductUuid};

    use super::*;

    fn product(stock: u32, is_active: bool) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: "Widget".to_string(),
            sku: "WID-1".to_string(),
            image: None,
            price: 10_00,
            stock,
            is_active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    #[test]
    fn addition_within_stock_succeeds() {
        let combined = check_addition(&product(5, true), 0, 3).expect("within stock");

        assert_eq!(combined, 3);
    }

    #[test]
    fn addition_combines_with_existing_quantity() {
        let combined = check_addition(&product(5, true), 3, 2).expect("exactly at stock");

        assert_eq!(combined, 5);
    }

    #[test]
    fn addition_beyond_stock_fails_with_insufficient_stock() {
        let result = check_addition(&product(5, true), 3, 3);

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock {
                    requested: 6,
                    available: 5
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[test]
    fn addition_to_inactive_product_is_unavailable() {
        let result = check_addition(&product(5, false), 0, 1);

        assert!(
            matches!(result, Err(CartsServiceError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );
    }

    #[test]
    fn addition_of_zero_is_invalid() {
        let result = check_addition(&product(5, true), 0, 0);

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[test]
    fn overwrite_up_to_stock_succeeds_then_fails_past_it() {
        let product = product(5, true);

        assert!(check_overwrite(&product, 5).is_ok(), "5 of 5 should fit");

        let result = check_overwrite(&product, 6);

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock {
                    requested: 6,
                    available: 5
                })
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[test]
    fn overwrite_of_zero_is_invalid() {
        let result = check_overwrite(&product(5, true), 0);

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }
}
