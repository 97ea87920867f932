//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        menu::{MenuService, PgMenuService},
        orders::{OrdersService, PgOrdersService},
        payments::{PaymentsService, PgPaymentsService, qr::PaymentsConfig},
        reviews::{PgReviewsService, ReviewsService},
        users::{PgUsersService, UsersService},
        vouchers::{PgVouchersService, VouchersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every service behind a trait object, shared by the CLI and the JSON API.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub menu: Arc<dyn MenuService>,
    pub orders: Arc<dyn OrdersService>,
    pub vouchers: Arc<dyn VouchersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Wire every `PostgreSQL` backed service onto one pool.
    #[must_use]
    pub fn new(db: &Db, payments: PaymentsConfig) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            menu: Arc::new(PgMenuService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            vouchers: Arc::new(PgVouchersService::new(db.clone())),
            payments: Arc::new(PgPaymentsService::new(db.clone(), payments)),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db.clone())),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        payments: PaymentsConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(&Db::new(pool), payments))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
