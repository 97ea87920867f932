//! Depot helper extensions.

use std::any::Any;

use eatsight_app::domain::users::records::UserUuid;
use salvo::prelude::{Depot, StatusError};

const USER_UUID_KEY: &str = "eatsight.user_uuid";

/// Typed access to what middleware leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
