//! Current-user depot helpers.

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::models::AuthenticatedUser;

const CURRENT_USER_KEY: &str = "storefront.current_user";

/// Access to the authenticated user the auth middleware stored.
pub(crate) trait CurrentUserExt {
    fn insert_current_user(&mut self, user: AuthenticatedUser);

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl CurrentUserExt for Depot {
    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.insert(CURRENT_USER_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.get::<AuthenticatedUser>(CURRENT_USER_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
