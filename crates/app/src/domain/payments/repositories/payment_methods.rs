//! Payment Methods Repository

use eatsight::payments::PaymentType;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    columns::try_get_parsed,
    payments::{
        data::NewPaymentMethod,
        records::{PaymentMethodRecord, PaymentMethodUuid},
    },
    users::records::UserUuid,
};

const CREATE_PAYMENT_METHOD_SQL: &str = include_str!("../sql/create_payment_method.sql");
const CLEAR_DEFAULT_PAYMENT_METHOD_SQL: &str =
    include_str!("../sql/clear_default_payment_method.sql");
const LIST_PAYMENT_METHODS_SQL: &str = include_str!("../sql/list_payment_methods.sql");
const FIND_PAYMENT_METHOD_SQL: &str = include_str!("../sql/find_payment_method.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentMethodsRepository;

impl PgPaymentMethodsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        method: &NewPaymentMethod,
    ) -> Result<PaymentMethodRecord, sqlx::Error> {
        if method.is_default {
            query(CLEAR_DEFAULT_PAYMENT_METHOD_SQL)
                .bind(user.into_uuid())
                .execute(&mut **tx)
                .await?;
        }

        query_as::<Postgres, PaymentMethodRecord>(CREATE_PAYMENT_METHOD_SQL)
            .bind(method.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(method.kind.as_str())
            .bind(method.card_number_last4.as_deref())
            .bind(method.card_brand.as_deref())
            .bind(method.holder_name.as_deref())
            .bind(method.is_default)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_payment_methods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<PaymentMethodRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentMethodRecord>(LIST_PAYMENT_METHODS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_payment_method(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        method: PaymentMethodUuid,
        user: UserUuid,
    ) -> Result<Option<PaymentMethodRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentMethodRecord>(FIND_PAYMENT_METHOD_SQL)
            .bind(method.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentMethodRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PaymentMethodUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            kind: try_get_parsed::<PaymentType>(row, "kind")?,
            card_number_last4: row.try_get("card_number_last4")?,
            card_brand: row.try_get("card_brand")?,
            holder_name: row.try_get("holder_name")?,
            is_default: row.try_get("is_default")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
