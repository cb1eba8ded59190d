//! Authentication

pub(crate) mod middleware;

use salvo::prelude::*;

use crate::extensions::*;

/// Gate for the admin-only section of the router.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.current_user_or_401() {
        Ok(user) if user.role.is_admin() => {
            ctrl.call_next(req, depot, res).await;
        }
        Ok(_customer) => {
            res.render(StatusError::forbidden().brief("Admin role required"));
        }
        Err(error) => {
            res.render(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        test::TestClient,
    };
    use testresult::TestResult;

    use crate::test_helpers::{inject_admin, inject_user, state_with_nothing};

    use super::*;

    #[salvo::handler]
    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn make_service(user_hoop: impl Handler) -> Service {
        let router = Router::new()
            .hoop(inject(state_with_nothing()))
            .hoop(user_hoop)
            .hoop(require_admin)
            .push(Router::new().get(ok_handler));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_admin_passes_the_gate() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(inject_admin))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let res = TestClient::get("http://example.com")
            .send(&make_service(inject_user))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
