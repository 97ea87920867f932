//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    auth::models::{NewUserToken, UserTokenRecord, UserTokenUuid},
    domain::users::records::UserUuid,
};

const CREATE_USER_TOKEN_SQL: &str = include_str!("sql/create_user_token.sql");
const FIND_ACTIVE_USER_TOKEN_SQL: &str = include_str!("sql/find_active_user_token.sql");
const TOUCH_USER_TOKEN_SQL: &str = include_str!("sql/touch_user_token.sql");
const LIST_USER_TOKENS_SQL: &str = include_str!("sql/list_user_tokens.sql");
const REVOKE_USER_TOKEN_SQL: &str = include_str!("sql/revoke_user_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: &NewUserToken,
    ) -> Result<UserTokenRecord, sqlx::Error> {
        query_as::<Postgres, UserTokenRecord>(CREATE_USER_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(token.user.into_uuid())
            .bind(&token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    /// Unrevoked, unexpired token with the given hash.
    pub(crate) async fn find_active_user_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_hash: &str,
    ) -> Result<Option<UserTokenRecord>, sqlx::Error> {
        query_as::<Postgres, UserTokenRecord>(FIND_ACTIVE_USER_TOKEN_SQL)
            .bind(token_hash)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_user_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: UserTokenUuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_USER_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(&mut **tx)
            .await
            .map(|_| ())
    }

    pub(crate) async fn list_user_tokens(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<UserTokenRecord>, sqlx::Error> {
        query_as::<Postgres, UserTokenRecord>(LIST_USER_TOKENS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Returns `None` when the token is unknown or already revoked.
    pub(crate) async fn revoke_user_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: UserTokenUuid,
    ) -> Result<Option<UserTokenRecord>, sqlx::Error> {
        query_as::<Postgres, UserTokenRecord>(REVOKE_USER_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserTokenRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserTokenUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
