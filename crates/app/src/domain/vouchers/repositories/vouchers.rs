//! Vouchers Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns::{points_to_i64, try_get_points},
    vouchers::{
        data::NewVoucher,
        records::{VoucherRecord, VoucherUuid},
    },
};

const CREATE_VOUCHER_SQL: &str = include_str!("../sql/create_voucher.sql");
const GET_VOUCHER_SQL: &str = include_str!("../sql/get_voucher.sql");
const GET_VOUCHER_BY_CODE_SQL: &str = include_str!("../sql/get_voucher_by_code.sql");
const LIST_VOUCHERS_SQL: &str = include_str!("../sql/list_vouchers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVouchersRepository;

impl PgVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: &NewVoucher,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(CREATE_VOUCHER_SQL)
            .bind(voucher.uuid.into_uuid())
            .bind(&voucher.code)
            .bind(&voucher.description)
            .bind(points_to_i64("points_cost", voucher.points_cost)?)
            .bind(voucher.value)
            .bind(voucher.discount_percentage)
            .bind(voucher.expiry_date.map(SqlxDate::from))
            .bind(voucher.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a voucher, share-locking it against concurrent edits.
    pub(crate) async fn get_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        voucher: VoucherUuid,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(GET_VOUCHER_SQL)
            .bind(voucher.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_voucher_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<VoucherRecord, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(GET_VOUCHER_BY_CODE_SQL)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        include_inactive: bool,
        today: Date,
    ) -> Result<Vec<VoucherRecord>, sqlx::Error> {
        query_as::<Postgres, VoucherRecord>(LIST_VOUCHERS_SQL)
            .bind(include_inactive)
            .bind(SqlxDate::from(today))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for VoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VoucherUuid::from_uuid(row.try_get("uuid")?),
            code: row.try_get("code")?,
            description: row.try_get("description")?,
            points_cost: try_get_points(row, "points_cost")?,
            value: row.try_get("value")?,
            discount_percentage: row.try_get("discount_percentage")?,
            expiry_date: row
                .try_get::<Option<SqlxDate>, _>("expiry_date")?
                .map(SqlxDate::to_jiff),
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
