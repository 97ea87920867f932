//! Users Data

use crate::domain::users::records::UserUuid;

/// New User Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub phone_number: Option<String>,
    pub total_points: u64,
}
