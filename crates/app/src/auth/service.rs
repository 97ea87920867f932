//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, debug, info};

use crate::{
    auth::{
        AuthServiceError, IssuedUserToken, UserTokenRecord, UserTokenSecret, UserTokenUuid,
        hash_user_token, is_well_formed,
        models::NewUserToken,
        repository::PgAuthRepository,
    },
    database::Db,
    domain::users::{records::UserUuid, repository::PgUsersRepository},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    tokens: PgAuthRepository,
    users: PgUsersRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            tokens: PgAuthRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.issue_token",
        skip(self),
        fields(user_uuid = %user, token_uuid = tracing::field::Empty),
        err
    )]
    async fn issue_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedUserToken, AuthServiceError> {
        if expires_at.is_some_and(|expires_at| expires_at <= Timestamp::now()) {
            return Err(AuthServiceError::ExpiryInPast);
        }

        let mut tx = self.db.begin().await?;

        self.users.get_user(&mut tx, user).await?;

        let token = UserTokenSecret::generate().to_token();

        let record = self
            .tokens
            .create_user_token(
                &mut tx,
                &NewUserToken {
                    uuid: UserTokenUuid::new(),
                    user,
                    token_hash: hash_user_token(&token),
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        Span::current().record("token_uuid", tracing::field::display(record.uuid));
        info!("token issued");

        Ok(IssuedUserToken { token, record })
    }

    async fn list_tokens(&self, user: UserUuid) -> Result<Vec<UserTokenRecord>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let tokens = self.tokens.list_user_tokens(&mut tx, user).await?;

        tx.commit().await?;

        Ok(tokens)
    }

    #[tracing::instrument(
        name = "auth.service.revoke_token",
        skip(self),
        fields(token_uuid = %token),
        err
    )]
    async fn revoke_token(&self, token: UserTokenUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.tokens.revoke_user_token(&mut tx, token).await?.is_some();

        tx.commit().await?;

        if revoked {
            info!("token revoked");
        } else {
            debug!("token unknown or already revoked");
        }

        Ok(revoked)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        if !is_well_formed(bearer_token) {
            return Err(AuthServiceError::NotFound);
        }

        let mut tx = self.db.begin().await?;

        let token = self
            .tokens
            .find_active_user_token(&mut tx, &hash_user_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        self.tokens.touch_user_token(&mut tx, token.uuid).await?;

        tx.commit().await?;

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue a bearer token for `user`. The raw token is only ever returned here.
    async fn issue_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedUserToken, AuthServiceError>;

    /// Every token issued to `user`, newest first.
    async fn list_tokens(&self, user: UserUuid) -> Result<Vec<UserTokenRecord>, AuthServiceError>;

    /// Returns `true` if the token was active.
    async fn revoke_token(&self, token: UserTokenUuid) -> Result<bool, AuthServiceError>;

    /// Resolve a bearer token to the user it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}
