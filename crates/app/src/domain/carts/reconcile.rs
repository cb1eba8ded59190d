//! Cart reconciliation.
//!
//! Cart items reference products weakly; reconciliation resolves each
//! reference and flags items whose product is gone, deleted, or inactive.
//! Totals are derived here from the valid items only, never read from a
//! stored column.

use rustc_hash::FxHashMap;

use crate::domain::{
    carts::models::{CartItem, CartItemUuid, ReconciledCartItem},
    products::models::{Product, ProductUuid},
};

/// Outcome of resolving a cart's items against the catalog.
#[derive(Debug, Clone)]
pub(crate) struct Reconciliation {
    /// Every item, in cart order, flagged valid (`Some` product) or invalid.
    pub(crate) items: Vec<ReconciledCartItem>,

    /// Uuids of the invalid items, for purging from storage.
    pub(crate) invalid_item_uuids: Vec<CartItemUuid>,
}

pub(crate) fn reconcile(
    items: Vec<CartItem>,
    products: &FxHashMap<ProductUuid, Product>,
) -> Reconciliation {
    let mut invalid_item_uuids = Vec::new();

    let items = items
        .into_iter()
        .map(|item| {
            let product = products
                .get(&item.product_uuid)
                .filter(|product| product.is_active)
                .cloned();

            if product.is_none() {
                invalid_item_uuids.push(item.uuid);
            }

            ReconciledCartItem { item, product }
        })
        .collect();

    Reconciliation {
        items,
        invalid_item_uuids,
    }
}

/// Sum of `unit_price * quantity` over the valid items.
pub(crate) fn subtotal(items: &[ReconciledCartItem]) -> u64 {
    items
        .iter()
        .filter(|entry| entry.is_valid())
        .map(|entry| u64::from(entry.item.quantity) * entry.item.unit_price)
        .sum()
}

/// Total unit count over the valid items.
pub(crate) fn item_count(items: &[ReconciledCartItem]) -> u64 {
    items
        .iter()
        .filter(|entry| entry.is_valid())
        .map(|entry| u64::from(entry.item.quantity))
        .sum()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn product(uuid: ProductUuid, is_active: bool) -> Product {
        Product {
            uuid,
            name: "Widget".to_string(),
            sku: "WID-1".to_string(),
            image: None,
            price: 10_00,
            stock: 10,
            is_active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    fn item(product_uuid: ProductUuid, quantity: u32, unit_price: u64) -> CartItem {
        CartItem {
            uuid: CartItemUuid::new(),
            product_uuid,
            quantity,
            unit_price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn catalog(products: Vec<Product>) -> FxHashMap<ProductUuid, Product> {
        products.into_iter().map(|p| (p.uuid, p)).collect()
    }

    #[test]
    fn all_items_valid_when_products_resolve_and_are_active() {
        let product_uuid = ProductUuid::new();
        let items = vec![item(product_uuid, 2, 5_00)];

        let result = reconcile(items, &catalog(vec![product(product_uuid, true)]));

        assert!(result.invalid_item_uuids.is_empty());
        assert!(result.items.iter().all(ReconciledCartItem::is_valid));
    }

    #[test]
    fn item_with_unresolvable_product_is_invalid() {
        let items = vec![item(ProductUuid::new(), 2, 5_00)];
        let uuid = items[0].uuid;

        let result = reconcile(items, &catalog(vec![]));

        assert_eq!(result.invalid_item_uuids, vec![uuid]);
        assert!(result.items[0].product.is_none());
    }

    #[test]
    fn item_with_inactive_product_is_invalid() {
        let product_uuid = ProductUuid::new();
        let items = vec![item(product_uuid, 2, 5_00)];

        let result = reconcile(items, &catalog(vec![product(product_uuid, false)]));

        assert_eq!(result.invalid_item_uuids.len(), 1);
        assert!(
            result.items[0].product.is_none(),
            "inactive products must surface as a missing product, not a priced one"
        );
    }

    #[test]
    fn cart_order_is_preserved_across_reconciliation() {
        let first = ProductUuid::new();
        let second = ProductUuid::new();
        let items = vec![item(first, 1, 1_00), item(second, 1, 2_00)];

        let result = reconcile(items, &catalog(vec![product(second, true)]));

        assert_eq!(result.items[0].item.product_uuid, first);
        assert_eq!(result.items[1].item.product_uuid, second);
        assert!(!result.items[0].is_valid());
        assert!(result.items[1].is_valid());
    }

    #[test]
    fn totals_cover_valid_items_only() {
        let valid = ProductUuid::new();
        let gone = ProductUuid::new();
        let items = vec![item(valid, 3, 10_00), item(gone, 2, 99_00)];

        let result = reconcile(items, &catalog(vec![product(valid, true)]));

        assert_eq!(subtotal(&result.items), 30_00);
        assert_eq!(item_count(&result.items), 3);
    }

    #[test]
    fn totals_use_the_price_snapshot_not_the_live_price() {
        let product_uuid = ProductUuid::new();
        // Snapshot of 5_00 at add time; the live product price is 10_00.
        let items = vec![item(product_uuid, 2, 5_00)];

        let result = reconcile(items, &catalog(vec![product(product_uuid, true)]));

        assert_eq!(subtotal(&result.items), 10_00);
    }

    #[test]
    fn empty_cart_reconciles_to_zero_totals() {
        let result = reconcile(vec![], &catalog(vec![]));

        assert!(result.items.is_empty());
        assert_eq!(subtotal(&result.items), 0);
        assert_eq!(item_count(&result.items), 0);
    }
}
