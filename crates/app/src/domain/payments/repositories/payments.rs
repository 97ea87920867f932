//! Payments Repository

use eatsight::payments::{PaymentStatus, PaymentType};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    columns::try_get_parsed,
    orders::records::OrderUuid,
    payments::{
        data::NewPayment,
        records::{PaymentMethodUuid, PaymentRecord, PaymentUuid},
    },
    users::records::UserUuid,
};

const CREATE_PAYMENT_SQL: &str = include_str!("../sql/create_payment.sql");
const GET_PAYMENT_SQL: &str = include_str!("../sql/get_payment.sql");
const LOCK_PAYMENT_SQL: &str = include_str!("../sql/lock_payment.sql");
const LIST_PAYMENTS_SQL: &str = include_str!("../sql/list_payments.sql");
const SETTLE_PAYMENT_SQL: &str = include_str!("../sql/settle_payment.sql");

/// Columns written when a pending payment is settled.
#[derive(Debug, Clone)]
pub(crate) struct Settlement {
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_date: Option<Timestamp>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: &NewPayment,
        deadline: Timestamp,
        created_at: Timestamp,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(CREATE_PAYMENT_SQL)
            .bind(payment.uuid.into_uuid())
            .bind(payment.order.into_uuid())
            .bind(payment.payment_method.map(PaymentMethodUuid::into_uuid))
            .bind(payment.payment_type.as_str())
            .bind(payment.amount)
            .bind(SqlxTimestamp::from(deadline))
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        user: UserUuid,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(GET_PAYMENT_SQL)
            .bind(payment.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a payment regardless of owner and hold its row lock.
    pub(crate) async fn lock_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(LOCK_PAYMENT_SQL)
            .bind(payment.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_payments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(LIST_PAYMENTS_SQL)
            .bind(user.into_uuid())
            .bind(status.map(PaymentStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    /// Settle a payment that is still pending.
    ///
    /// Returns `None` when it has already been settled.
    pub(crate) async fn settle_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        settlement: Settlement,
    ) -> Result<Option<PaymentRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentRecord>(SETTLE_PAYMENT_SQL)
            .bind(payment.into_uuid())
            .bind(settlement.status.as_str())
            .bind(settlement.transaction_id)
            .bind(settlement.payment_date.map(SqlxTimestamp::from))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            payment_method_uuid: row
                .try_get::<Option<Uuid>, _>("payment_method_uuid")?
                .map(PaymentMethodUuid::from_uuid),
            payment_type: try_get_parsed::<PaymentType>(row, "payment_type")?,
            amount: row.try_get("amount")?,
            status: try_get_parsed::<PaymentStatus>(row, "status")?,
            transaction_id: row.try_get("transaction_id")?,
            payment_deadline: row
                .try_get::<SqlxTimestamp, _>("payment_deadline")?
                .to_jiff(),
            payment_date: row
                .try_get::<Option<SqlxTimestamp>, _>("payment_date")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            qr_code: None,
            verification: None,
        })
    }
}
