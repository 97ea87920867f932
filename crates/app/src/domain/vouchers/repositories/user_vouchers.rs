//! User Vouchers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::records::OrderUuid,
    users::records::UserUuid,
    vouchers::records::{UserVoucherRecord, UserVoucherUuid, VoucherRecord, VoucherUuid},
};

const CREATE_USER_VOUCHER_SQL: &str = include_str!("../sql/create_user_voucher.sql");
const FIND_USER_VOUCHER_SQL: &str = include_str!("../sql/find_user_voucher.sql");
const FIND_UNUSED_USER_VOUCHER_SQL: &str = include_str!("../sql/find_unused_user_voucher.sql");
const LIST_USER_VOUCHERS_SQL: &str = include_str!("../sql/list_user_vouchers.sql");
const CLAIM_USER_VOUCHER_SQL: &str = include_str!("../sql/claim_user_voucher.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUserVouchersRepository;

impl PgUserVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_voucher: UserVoucherUuid,
        user: UserUuid,
        voucher: VoucherUuid,
    ) -> Result<UserVoucherRecord, sqlx::Error> {
        query_as::<Postgres, UserVoucherRecord>(CREATE_USER_VOUCHER_SQL)
            .bind(user_voucher.into_uuid())
            .bind(user.into_uuid())
            .bind(voucher.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_user_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_voucher: UserVoucherUuid,
        user: UserUuid,
    ) -> Result<Option<UserVoucherRecord>, sqlx::Error> {
        query_as::<Postgres, UserVoucherRecord>(FIND_USER_VOUCHER_SQL)
            .bind(user_voucher.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Oldest unused copy of `voucher` held by `user`, row-locked.
    ///
    /// Copies locked by a concurrent transaction are skipped.
    pub(crate) async fn find_unused_user_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        voucher: VoucherUuid,
    ) -> Result<Option<UserVoucherUuid>, sqlx::Error> {
        query_scalar::<Postgres, Uuid>(FIND_UNUSED_USER_VOUCHER_SQL)
            .bind(user.into_uuid())
            .bind(voucher.into_uuid())
            .fetch_optional(&mut **tx)
            .await
            .map(|uuid| uuid.map(UserVoucherUuid::from_uuid))
    }

    pub(crate) async fn list_user_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        used: Option<bool>,
    ) -> Result<Vec<UserVoucherRecord>, sqlx::Error> {
        query_as::<Postgres, UserVoucherRecord>(LIST_USER_VOUCHERS_SQL)
            .bind(user.into_uuid())
            .bind(used)
            .fetch_all(&mut **tx)
            .await
    }

    /// Mark an unused voucher as spent on `order`.
    ///
    /// Returns `None` when the voucher is not the user's or was already used.
    pub(crate) async fn claim_user_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_voucher: UserVoucherUuid,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Option<UserVoucherRecord>, sqlx::Error> {
        query_as::<Postgres, UserVoucherRecord>(CLAIM_USER_VOUCHER_SQL)
            .bind(user_voucher.into_uuid())
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserVoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserVoucherUuid::from_uuid(row.try_get("user_voucher_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            is_used: row.try_get("is_used")?,
            order_uuid: row
                .try_get::<Option<Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            date_acquired: row.try_get::<SqlxTimestamp, _>("date_acquired")?.to_jiff(),
            created_at: row
                .try_get::<SqlxTimestamp, _>("user_voucher_created_at")?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>("user_voucher_updated_at")?
                .to_jiff(),
            voucher: VoucherRecord::from_row(row)?,
        })
    }
}
