//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    #[tracing::instrument(
        name = "users.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "users.service.add_points",
        skip(self),
        fields(user_uuid = %user, total_points = tracing::field::Empty),
        err
    )]
    async fn add_points(&self, user: UserUuid, points: u64) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.add_points(&mut tx, user, points).await?;

        tx.commit().await?;

        Span::current().record("total_points", record.total_points);

        Ok(record)
    }

    #[tracing::instrument(
        name = "users.service.deduct_points",
        skip(self),
        fields(user_uuid = %user),
        err
    )]
    async fn deduct_points(&self, user: UserUuid, points: u64) -> Result<bool, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let deducted = self.repository.deduct_points(&mut tx, user, points).await?;

        tx.commit().await?;

        if deducted.is_none() {
            info!(points, "point deduction refused");
        }

        Ok(deducted.is_some())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a user with an opening point balance.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Credit reward points.
    async fn add_points(&self, user: UserUuid, points: u64)
    -> Result<UserRecord, UsersServiceError>;

    /// Debit reward points when the balance covers them.
    ///
    /// Returns `false`, leaving the balance untouched, when it does not. The balance check
    /// and the debit are one conditional update, so concurrent debits cannot overdraw.
    async fn deduct_points(&self, user: UserUuid, points: u64) -> Result<bool, UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::create_user};

    use super::*;

    #[tokio::test]
    async fn create_user_returns_opening_balance() -> TestResult {
        let ctx = TestContext::new().await;

        let user = create_user(&ctx, 1_200).await?;

        assert_eq!(user.total_points, 1_200);
        assert_eq!(ctx.users.get_user(user.uuid).await?.name, user.name);

        Ok(())
    }

    #[tokio::test]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_phone_number_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let new_user = |uuid| NewUser {
            uuid,
            name: "Ayu".to_string(),
            phone_number: Some("+6281234567890".to_string()),
            total_points: 0,
        };

        ctx.users.create_user(new_user(UserUuid::new())).await?;

        let result = ctx.users.create_user(new_user(UserUuid::new())).await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_points_accumulates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 100).await?;

        let updated = ctx.users.add_points(user.uuid, 500).await?;

        assert_eq!(updated.total_points, 600);

        Ok(())
    }

    #[tokio::test]
    async fn deduct_points_refuses_overdraw() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 300).await?;

        assert!(!ctx.users.deduct_points(user.uuid, 301).await?);
        assert_eq!(ctx.users.get_user(user.uuid).await?.total_points, 300);

        assert!(ctx.users.deduct_points(user.uuid, 300).await?);
        assert_eq!(ctx.users.get_user(user.uuid).await?.total_points, 0);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_deductions_never_overdraw() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 500).await?;

        let (first, second) = tokio::join!(
            ctx.users.deduct_points(user.uuid, 300),
            ctx.users.deduct_points(user.uuid, 300),
        );

        let succeeded = [first?, second?].into_iter().filter(|ok| *ok).count();

        assert_eq!(succeeded, 1, "exactly one deduction should win");
        assert_eq!(ctx.users.get_user(user.uuid).await?.total_points, 200);

        Ok(())
    }
}
