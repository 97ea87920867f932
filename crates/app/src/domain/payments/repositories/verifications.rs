//! Payment Verifications Repository

use eatsight::payments::{VerificationStatus, VerificationType};
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    columns::try_get_parsed,
    menu::records::TableUuid,
    payments::records::{PaymentUuid, PaymentVerificationRecord, PaymentVerificationUuid},
};

const CREATE_VERIFICATION_SQL: &str = include_str!("../sql/create_verification.sql");
const FIND_VERIFICATION_SQL: &str = include_str!("../sql/find_verification.sql");
const SETTLE_VERIFICATION_SQL: &str = include_str!("../sql/settle_verification.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgVerificationsRepository;

impl PgVerificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_verification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        verification_type: VerificationType,
        table: Option<TableUuid>,
    ) -> Result<PaymentVerificationRecord, sqlx::Error> {
        query_as::<Postgres, PaymentVerificationRecord>(CREATE_VERIFICATION_SQL)
            .bind(PaymentVerificationUuid::new().into_uuid())
            .bind(payment.into_uuid())
            .bind(verification_type.as_str())
            .bind(table.map(TableUuid::into_uuid))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_verification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
    ) -> Result<Option<PaymentVerificationRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentVerificationRecord>(FIND_VERIFICATION_SQL)
            .bind(payment.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn settle_verification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        status: VerificationStatus,
        message: Option<&str>,
        cashier_name: Option<&str>,
        verified_at: Timestamp,
    ) -> Result<Option<PaymentVerificationRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentVerificationRecord>(SETTLE_VERIFICATION_SQL)
            .bind(payment.into_uuid())
            .bind(status.as_str())
            .bind(message)
            .bind(cashier_name)
            .bind(SqlxTimestamp::from(verified_at))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentVerificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentVerificationUuid::from_uuid(row.try_get("uuid")?),
            payment_uuid: PaymentUuid::from_uuid(row.try_get("payment_uuid")?),
            verification_type: try_get_parsed::<VerificationType>(row, "verification_type")?,
            verification_status: try_get_parsed::<VerificationStatus>(row, "verification_status")?,
            verification_message: row.try_get("verification_message")?,
            cashier_name: row.try_get("cashier_name")?,
            table_uuid: row
                .try_get::<Option<Uuid>, _>("table_uuid")?
                .map(TableUuid::from_uuid),
            verified_at: row
                .try_get::<Option<SqlxTimestamp>, _>("verified_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
