//! Carts service.
//!
//! The consistency engine over cart storage: stock bounds are enforced at
//! mutation time, and every read reconciles the cart against the catalog,
//! purging items whose product has gone away or been deactivated.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{
                Cart, CartItemUuid, CleanupSummary, NewCartItem, PurgedCart, ReconciledCart,
                ReconciledCartItem,
            },
            reconcile,
            repositories::{PgCartItemsRepository, PgCartsRepository},
            stock,
        },
        products::{models::ProductUuid, repository::PgProductsRepository},
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Loads and reconciles the cart's items, deleting the rows of any item
    /// that no longer resolves to an active product. Returns the reconciled
    /// view (invalid items still listed, flagged by a missing product) and
    /// the number of rows purged.
    async fn load_reconciled(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        cart: &Cart,
    ) -> Result<(ReconciledCart, u64), CartsServiceError> {
        let items = self
            .items_repository
            .get_cart_items(tx, cart.uuid)
            .await?;

        let product_uuids: Vec<Uuid> = items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        let products: FxHashMap<ProductUuid, _> = self
            .products_repository
            .get_products_by_uuids(tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let reconciliation = reconcile::reconcile(items, &products);

        let purged = if reconciliation.invalid_item_uuids.is_empty() {
            0
        } else {
            let uuids: Vec<Uuid> = reconciliation
                .invalid_item_uuids
                .iter()
                .copied()
                .map(CartItemUuid::into_uuid)
                .collect();

            let purged = self
                .items_repository
                .delete_items_by_uuids(tx, cart.uuid, &uuids)
                .await?;

            tracing::debug!(cart_uuid = %cart.uuid, purged, "purged invalid cart items");

            purged
        };

        let subtotal = reconcile::subtotal(&reconciliation.items);
        let item_count = reconcile::item_count(&reconciliation.items);

        Ok((
            ReconciledCart {
                uuid: cart.uuid,
                items: reconciliation.items,
                subtotal,
                item_count,
                created_at: cart.created_at,
                updated_at: cart.updated_at,
            },
            purged,
        ))
    }

    async fn cleanup_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        products: &[Uuid],
    ) -> Result<CleanupSummary, CartsServiceError> {
        if products.is_empty() {
            return Ok(CleanupSummary::default());
        }

        let cart_uuids = self
            .items_repository
            .delete_items_by_products(tx, products)
            .await?;

        let items_removed = cart_uuids.len() as u64;
        let carts_updated = cart_uuids
            .into_iter()
            .collect::<rustc_hash::FxHashSet<Uuid>>()
            .len() as u64;

        Ok(CleanupSummary {
            carts_updated,
            items_removed,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<ReconciledCart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;
        let (reconciled, _purged) = self.load_reconciled(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(reconciled)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<ReconciledCart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product_uuid)
            .await?;

        let existing = self
            .items_repository
            .find_item_by_product(&mut tx, cart.uuid, product.uuid)
            .await?;

        let existing_quantity = existing.as_ref().map_or(0, |item| item.quantity);
        let combined = stock::check_addition(&product, existing_quantity, item.quantity)?;

        if let Some(existing) = existing {
            self.items_repository
                .set_item_quantity(&mut tx, cart.uuid, existing.uuid, combined)
                .await?;
        } else {
            self.items_repository
                .create_cart_item(&mut tx, cart.uuid, product.uuid, item.quantity, product.price)
                .await?;
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let (reconciled, _purged) = self.load_reconciled(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(reconciled)
    }

    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<ReconciledCart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_cart_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let item = self
            .items_repository
            .get_cart_item(&mut tx, cart.uuid, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let product = self
            .products_repository
            .get_product(&mut tx, item.product_uuid)
            .await?;

        stock::check_overwrite(&product, quantity)?;

        self.items_repository
            .set_item_quantity(&mut tx, cart.uuid, item.uuid, quantity)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let (reconciled, _purged) = self.load_reconciled(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(reconciled)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<ReconciledCart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .carts_repository
            .get_cart_by_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let (reconciled, _purged) = self.load_reconciled(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(reconciled)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<ReconciledCart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;

        self.items_repository
            .delete_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        let (reconciled, _purged) = self.load_reconciled(&mut tx, &cart).await?;

        tx.commit().await?;

        Ok(reconciled)
    }

    async fn purge_invalid_items(&self, user: UserUuid) -> Result<PurgedCart, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;
        let (mut reconciled, purged) = self.load_reconciled(&mut tx, &cart).await?;

        tx.commit().await?;

        // The caller asked for the cart after the purge.
        reconciled.items.retain(ReconciledCartItem::is_valid);

        Ok(PurgedCart {
            items_removed: purged,
            cart: reconciled,
        })
    }

    async fn cleanup_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<CleanupSummary, CartsServiceError> {
        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        let mut tx = self.db.begin_transaction().await?;

        let summary = self.cleanup_in_tx(&mut tx, &uuids).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn cleanup_inactive(&self) -> Result<CleanupSummary, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let inactive = self.products_repository.inactive_product_uuids(&mut tx).await?;
        let summary = self.cleanup_in_tx(&mut tx, &inactive).await?;

        tx.commit().await?;

        Ok(summary)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart, creating it lazily and reconciling it
    /// against the catalog. Invalid items are listed flagged and removed
    /// from storage as a side effect.
    async fn get_cart(&self, user: UserUuid) -> Result<ReconciledCart, CartsServiceError>;

    /// Add a product to the cart, or raise the quantity of an existing item.
    /// The product's current price is snapshotted on first add.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<ReconciledCart, CartsServiceError>;

    /// Overwrite an item's quantity, subject to the stock bound.
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<ReconciledCart, CartsServiceError>;

    /// Remove an item unconditionally; an empty resulting cart is fine.
    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<ReconciledCart, CartsServiceError>;

    /// Remove every item from the cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<ReconciledCart, CartsServiceError>;

    /// Explicitly purge invalid items, reporting how many were removed.
    async fn purge_invalid_items(&self, user: UserUuid) -> Result<PurgedCart, CartsServiceError>;

    /// Remove the given products from every cart that references them.
    /// Idempotent: a second run with no intervening changes removes nothing.
    async fn cleanup_products(
        &self,
        products: &[ProductUuid],
    ) -> Result<CleanupSummary, CartsServiceError>;

    /// Compute the inactive/deleted product set and clean it out of all carts.
    async fn cleanup_inactive(&self) -> Result<CleanupSummary, CartsServiceError>;
}
