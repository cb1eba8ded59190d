//! Orders service.
//!
//! Order derivation: a reconciled cart is snapshotted into an immutable
//! order, stock is claimed with conditional decrements, and the cart is
//! cleared, all inside one transaction.

use async_trait::async_trait;
use jiff::{Timestamp, Zoned};
use mockall::automock;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            reconcile,
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        orders::{
            errors::OrdersServiceError,
            models::{
                NewOrder, Order, OrderItem, OrderItemUuid, OrderStatus, OrderStatusUpdate,
                OrderUuid, PaymentMethod, PaymentStatus,
            },
            number::format_order_number,
            repository::PgOrdersRepository,
        },
        products::{models::ProductUuid, repository::PgProductsRepository},
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError> {
        order.billing_address.validate()?;

        if let Some(shipping) = &order.shipping_address {
            shipping.validate()?;
        }

        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts_repository.get_or_create_cart(&mut tx, user).await?;
        let items = self.items_repository.get_cart_items(&mut tx, cart.uuid).await?;

        let product_uuids: Vec<Uuid> = items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        let products: FxHashMap<ProductUuid, _> = self
            .products_repository
            .get_products_by_uuids(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let reconciliation = reconcile::reconcile(items, &products);

        let valid: Vec<_> = reconciliation
            .items
            .into_iter()
            .filter_map(|entry| entry.product.map(|product| (entry.item, product)))
            .collect();

        if valid.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        for (item, product) in &valid {
            let rows_affected = self
                .products_repository
                .decrement_stock(&mut tx, product.uuid, item.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::InsufficientStock {
                    product: product.uuid,
                });
            }
        }

        let today = Zoned::now().date();
        let sequence = self.orders_repository.next_daily_sequence(&mut tx, today).await?;

        let subtotal: u64 = valid
            .iter()
            .map(|(item, _)| u64::from(item.quantity) * item.unit_price)
            .sum();

        let order_items: Vec<OrderItem> = valid
            .iter()
            .map(|(item, product)| OrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: product.uuid,
                name: product.name.clone(),
                sku: product.sku.clone(),
                image: product.image.clone(),
                price: product.price,
                quantity: item.quantity,
            })
            .collect();

        let billing_address = order.billing_address;
        let shipping_address = order
            .shipping_address
            .unwrap_or_else(|| billing_address.clone());

        let now = Timestamp::now();

        let order = Order {
            uuid: OrderUuid::new(),
            order_number: format_order_number(today, sequence),
            user_uuid: user,
            items: order_items,
            billing_address,
            shipping_address,
            payment_method: PaymentMethod::QrTransfer,
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
            subtotal,
            tax: 0,
            shipping_cost: 0,
            discount: 0,
            total: subtotal,
            created_at: now,
            updated_at: now,
        };

        self.orders_repository.create_order(&mut tx, &order).await?;

        for item in &order.items {
            self.orders_repository
                .create_order_item(&mut tx, order.uuid, item)
                .await?;
        }

        self.items_repository
            .delete_cart_items(&mut tx, cart.uuid)
            .await?;

        self.carts_repository.touch_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.orders_repository.list_orders_by_user(&mut tx, user).await?;

        for order in &mut orders {
            order.items = self.orders_repository.get_order_items(&mut tx, order.uuid).await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self
            .orders_repository
            .get_order_for_user(&mut tx, order, user)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !order.order_status.is_customer_cancellable() {
            return Err(OrdersServiceError::InvalidTransition {
                from: order.order_status,
            });
        }

        let payment_status = order.payment_status.on_cancel();

        let mut updated = self
            .orders_repository
            .update_order_status(&mut tx, order.uuid, OrderStatus::Cancelled, payment_status)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        updated.items = self
            .orders_repository
            .get_order_items(&mut tx, updated.uuid)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let current = self
            .orders_repository
            .get_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        // Operational override: no transition checks on the admin path.
        let order_status = update.order_status.unwrap_or(current.order_status);
        let payment_status = update.payment_status.unwrap_or(current.payment_status);

        let mut updated = self
            .orders_repository
            .update_order_status(&mut tx, current.uuid, order_status, payment_status)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        updated.items = self
            .orders_repository
            .get_order_items(&mut tx, updated.uuid)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Derive an order from the user's reconciled cart and clear the cart.
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Customer cancellation, allowed while the order is still pending,
    /// confirmed, or processing.
    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Admin status assignment without transition checks.
    async fn set_status(
        &self,
        order: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<Order, OrdersServiceError>;
}
