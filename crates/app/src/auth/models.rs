//! Auth Models

use crate::{
    domain::users::models::{UserRole, UserUuid},
    uuids::TypedUuid,
};

/// The identity a bearer token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub role: UserRole,
}

/// API Token UUID
pub type ApiTokenUuid = TypedUuid<ApiToken>;

/// API Token Record
///
/// Only the SHA-256 digest of the opaque token is stored.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub uuid: ApiTokenUuid,
    pub user_uuid: UserUuid,
    pub token_hash: String,
}
