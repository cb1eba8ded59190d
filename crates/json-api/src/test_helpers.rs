//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, models::AuthenticatedUser},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{CartUuid, ReconciledCart},
        },
        orders::{
            MockOrdersService,
            models::{Address, Order, OrderStatus, OrderUuid, PaymentMethod, PaymentStatus},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        users::{
            MockUsersService,
            models::{UserRole, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::nil()),
    role: UserRole::Customer,
};

pub(crate) const TEST_ADMIN: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    role: UserRole::Admin,
};

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_USER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_get_user().never();
    users.expect_create_user().never();

    users
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();
    carts.expect_purge_invalid_items().never();
    carts.expect_cleanup_products().never();
    carts.expect_cleanup_inactive().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders().never();
    orders.expect_cancel_order().never();
    orders.expect_set_status().never();

    orders
}

fn make_state(
    products: MockProductsService,
    carts: MockCartsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    Arc::new(State::new(AppContext {
        products: Arc::new(products),
        carts: Arc::new(carts),
        orders: Arc::new(orders),
        users: Arc::new(strict_users_mock()),
        auth: Arc::new(auth),
    }))
}

pub(crate) fn state_with_nothing() -> Arc<State> {
    make_state(
        strict_products_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(
        strict_products_mock(),
        strict_carts_mock(),
        strict_orders_mock(),
        auth,
    )
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    make_state(
        strict_products_mock(),
        carts,
        strict_orders_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    make_state(
        strict_products_mock(),
        strict_carts_mock(),
        orders,
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    make_state(
        products,
        strict_carts_mock(),
        strict_orders_mock(),
        strict_auth_mock(),
    )
}

pub(crate) fn state_with_products_and_carts(
    products: MockProductsService,
    carts: MockCartsService,
) -> Arc<State> {
    make_state(products, carts, strict_orders_mock(), strict_auth_mock())
}

fn service_with_state(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service_with_state(state_with_carts(carts), route)
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service_with_state(state_with_orders(orders), route)
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    service_with_state(state_with_products(products), route)
}

pub(crate) fn products_and_carts_service(
    products: MockProductsService,
    carts: MockCartsService,
    route: Router,
) -> Service {
    service_with_state(state_with_products_and_carts(products, carts), route)
}

pub(crate) fn make_cart(uuid: CartUuid) -> ReconciledCart {
    ReconciledCart {
        uuid,
        items: Vec::new(),
        subtotal: 0,
        item_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Widget".to_string(),
        sku: "WID-1".to_string(),
        image: None,
        price: 10_00,
        stock: 5,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_address() -> Address {
    Address {
        name: "Ada Lovelace".to_string(),
        line1: "12 Analytical Row".to_string(),
        line2: None,
        city: "London".to_string(),
        region: String::new(),
        postal_code: "N1 7AA".to_string(),
        country: "GB".to_string(),
        phone: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid) -> Order {
    Order {
        uuid,
        order_number: "ORD2608060001".to_string(),
        user_uuid: TEST_USER.uuid,
        items: Vec::new(),
        billing_address: make_address(),
        shipping_address: make_address(),
        payment_method: PaymentMethod::QrTransfer,
        payment_status: PaymentStatus::Pending,
        order_status: OrderStatus::Pending,
        subtotal: 0,
        tax: 0,
        shipping_cost: 0,
        discount: 0,
        total: 0,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
