//! Cleanup Inactive Products Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cleanup Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CleanupResponse {
    /// Number of carts that lost at least one item
    pub carts_updated: u64,

    /// Number of items removed across all carts
    pub items_removed: u64,
}

/// Cleanup Inactive Products Handler
///
/// Admin catch-all: computes the inactive/deleted product set and removes
/// those products from every cart.
#[endpoint(
    tags("carts"),
    summary = "Cleanup Inactive Products",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cleanup finished"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "carts.cleanup_inactive", skip(depot), err)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CleanupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let _user = depot.current_user_or_401()?;

    let summary = state
        .app
        .carts
        .cleanup_inactive()
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        carts_updated = summary.carts_updated,
        items_removed = summary.items_removed,
        "cleaned up inactive products from carts"
    );

    Ok(Json(CleanupResponse {
        carts_updated: summary.carts_updated,
        items_removed: summary.items_removed,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::carts::{MockCartsService, models::CleanupSummary};

    use crate::test_helpers::carts_service;

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("admin/carts/cleanup-inactive").post(handler),
        )
    }

    #[tokio::test]
    async fn test_cleanup_reports_summary() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_cleanup_inactive().once().return_once(|| {
            Ok(CleanupSummary {
                carts_updated: 3,
                items_removed: 7,
            })
        });

        let mut res = TestClient::post("http://example.com/admin/carts/cleanup-inactive")
            .send(&make_service(carts))
            .await;

        let body: CleanupResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.carts_updated, 3);
        assert_eq!(body.items_removed, 7);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_run_removes_nothing() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_cleanup_inactive()
            .once()
            .return_once(|| Ok(CleanupSummary::default()));

        let mut res = TestClient::post("http://example.com/admin/carts/cleanup-inactive")
            .send(&make_service(carts))
            .await;

        let body: CleanupResponse = res.take_json().await?;

        assert_eq!(body.items_removed, 0);

        Ok(())
    }
}
