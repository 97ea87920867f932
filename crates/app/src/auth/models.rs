//! Auth data models.

use jiff::Timestamp;

use crate::{domain::users::records::UserUuid, uuids::TypedUuid};

pub type UserTokenUuid = TypedUuid<UserTokenRecord>;

/// Bearer token metadata persisted in storage. The hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTokenRecord {
    pub uuid: UserTokenUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New bearer token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewUserToken {
    pub uuid: UserTokenUuid,
    pub user: UserUuid,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Token issuance result carrying the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedUserToken {
    pub token: String,
    pub record: UserTokenRecord,
}
