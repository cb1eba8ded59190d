//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{ApiToken, ApiTokenUuid, AuthenticatedUser},
        repository::PgAuthRepository,
        token::{generate_api_token, hash_api_token},
    },
    domain::users::models::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user, returning the raw token.
    /// It is only shown once; storage keeps the hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn issue_api_token(&self, user: UserUuid) -> Result<String, AuthServiceError> {
        let raw_token = generate_api_token();

        self.repository
            .create_api_token(&ApiToken {
                uuid: ApiTokenUuid::new(),
                user_uuid: user,
                token_hash: hash_api_token(&raw_token),
            })
            .await?;

        Ok(raw_token)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        self.repository
            .find_user_by_token_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it identifies.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
