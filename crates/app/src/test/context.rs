//! Test context for service-level integration tests.

use tempfile::TempDir;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        menu::PgMenuService, orders::PgOrdersService,
        payments::{PgPaymentsService, qr::PaymentsConfig},
        reviews::PgReviewsService, users::PgUsersService, vouchers::PgVouchersService,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub payments_config: PaymentsConfig,
    pub users: PgUsersService,
    pub menu: PgMenuService,
    pub orders: PgOrdersService,
    pub vouchers: PgVouchersService,
    pub payments: PgPaymentsService,
    pub reviews: PgReviewsService,
    pub auth: PgAuthService,

    /// QR images land here; removed with the context.
    _media_root: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let media_root = TempDir::new().expect("Failed to create media root");

        let payments_config = PaymentsConfig {
            base_url: "https://eatsight.test".to_string(),
            media_root: media_root.path().to_path_buf(),
        };

        Self {
            users: PgUsersService::new(db.clone()),
            menu: PgMenuService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            vouchers: PgVouchersService::new(db.clone()),
            payments: PgPaymentsService::new(db.clone(), payments_config.clone()),
            reviews: PgReviewsService::new(db.clone()),
            auth: PgAuthService::new(db),
            payments_config,
            db: test_db,
            _media_root: media_root,
        }
    }

    /// A fresh handle onto the test database, for services built inside a test.
    pub fn db(&self) -> Db {
        Db::new(self.db.pool().clone())
    }
}
