//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns::{points_to_i64, try_get_points},
    users::{
        data::NewUser,
        records::{UserRecord, UserUuid},
    },
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const ADD_POINTS_SQL: &str = include_str!("sql/add_points.sql");
const DEDUCT_POINTS_SQL: &str = include_str!("sql/deduct_points.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.name)
            .bind(user.phone_number.as_deref())
            .bind(points_to_i64("total_points", user.total_points)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn add_points(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        points: u64,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(ADD_POINTS_SQL)
            .bind(user.into_uuid())
            .bind(points_to_i64("points", points)?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Deduct `points` only when the balance covers them.
    ///
    /// Returns `None` when the user is missing or the balance is short.
    pub(crate) async fn deduct_points(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        points: u64,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(DEDUCT_POINTS_SQL)
            .bind(user.into_uuid())
            .bind(points_to_i64("points", points)?)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            phone_number: row.try_get("phone_number")?,
            total_points: try_get_points(row, "total_points")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
