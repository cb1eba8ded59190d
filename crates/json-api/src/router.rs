//! App Router

use salvo::Router;

use crate::{auth, carts, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::handlers::get::handler)
                .delete(carts::handlers::clear::handler)
                .push(
                    Router::with_path("invalid-items")
                        .delete(carts::handlers::purge_invalid::handler),
                )
                .push(
                    Router::with_path("items")
                        .post(carts::items::handlers::create::handler)
                        .push(
                            Router::with_path("{item}")
                                .put(carts::items::handlers::update::handler)
                                .delete(carts::items::handlers::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::handlers::index::handler)
                .post(orders::handlers::create::handler)
                .push(Router::with_path("{order}/cancel").patch(orders::handlers::cancel::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::handlers::index::handler)
                .push(Router::with_path("{product}").get(products::handlers::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::require_admin)
                .push(
                    Router::with_path("products")
                        .post(products::handlers::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(products::handlers::update::handler)
                                .delete(products::handlers::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("admin/carts/cleanup-inactive")
                        .post(carts::handlers::cleanup_inactive::handler),
                )
                .push(
                    Router::with_path("admin/orders/{order}/status")
                        .put(orders::handlers::update_status::handler),
                ),
        )
}
