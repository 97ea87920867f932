//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub phone_number: Option<String>,

    /// Reward point balance, never negative.
    pub total_points: u64,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
