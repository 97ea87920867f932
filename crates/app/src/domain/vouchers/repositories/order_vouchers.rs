//! Order Vouchers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    orders::records::OrderUuid,
    vouchers::records::{OrderVoucherRecord, OrderVoucherUuid, UserVoucherUuid, VoucherUuid},
};

const CREATE_ORDER_VOUCHER_SQL: &str = include_str!("../sql/create_order_voucher.sql");
const LIST_ORDER_VOUCHERS_SQL: &str = include_str!("../sql/list_order_vouchers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderVouchersRepository;

impl PgOrderVouchersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_voucher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        voucher: VoucherUuid,
        user_voucher: UserVoucherUuid,
        discount_amount: Decimal,
    ) -> Result<OrderVoucherRecord, sqlx::Error> {
        query_as::<Postgres, OrderVoucherRecord>(CREATE_ORDER_VOUCHER_SQL)
            .bind(OrderVoucherUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(voucher.into_uuid())
            .bind(user_voucher.into_uuid())
            .bind(discount_amount)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_vouchers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderVoucherRecord>, sqlx::Error> {
        query_as::<Postgres, OrderVoucherRecord>(LIST_ORDER_VOUCHERS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderVoucherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderVoucherUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            voucher_uuid: VoucherUuid::from_uuid(row.try_get("voucher_uuid")?),
            user_voucher_uuid: UserVoucherUuid::from_uuid(row.try_get("user_voucher_uuid")?),
            discount_amount: row.try_get("discount_amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
