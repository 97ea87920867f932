//! QR Codes Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    payments::records::{PaymentUuid, QrCodeRecord, QrCodeUuid},
    users::records::UserUuid,
};

const CREATE_QR_CODE_SQL: &str = include_str!("../sql/create_qr_code.sql");
const FIND_QR_CODE_SQL: &str = include_str!("../sql/find_qr_code.sql");
const MARK_QR_CODE_DOWNLOADED_SQL: &str = include_str!("../sql/mark_qr_code_downloaded.sql");
const MARK_QR_CODE_SHARED_SQL: &str = include_str!("../sql/mark_qr_code_shared.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgQrCodesRepository;

impl PgQrCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_qr_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        qr_data: &str,
        qr_image_path: &str,
        expiry_time: Timestamp,
    ) -> Result<QrCodeRecord, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(CREATE_QR_CODE_SQL)
            .bind(QrCodeUuid::new().into_uuid())
            .bind(payment.into_uuid())
            .bind(qr_data)
            .bind(qr_image_path)
            .bind(SqlxTimestamp::from(expiry_time))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_qr_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(FIND_QR_CODE_SQL)
            .bind(payment.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Flag the QR of the user's QRIS payment as downloaded.
    pub(crate) async fn mark_downloaded(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        user: UserUuid,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(MARK_QR_CODE_DOWNLOADED_SQL)
            .bind(payment.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Flag the QR of the user's QRIS payment as shared.
    pub(crate) async fn mark_shared(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payment: PaymentUuid,
        user: UserUuid,
    ) -> Result<Option<QrCodeRecord>, sqlx::Error> {
        query_as::<Postgres, QrCodeRecord>(MARK_QR_CODE_SHARED_SQL)
            .bind(payment.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for QrCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: QrCodeUuid::from_uuid(row.try_get("uuid")?),
            payment_uuid: PaymentUuid::from_uuid(row.try_get("payment_uuid")?),
            qr_data: row.try_get("qr_data")?,
            qr_image_path: row.try_get("qr_image_path")?,
            is_downloaded: row.try_get("is_downloaded")?,
            is_shared: row.try_get("is_shared")?,
            expiry_time: row.try_get::<SqlxTimestamp, _>("expiry_time")?.to_jiff(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
