//! Vouchers service.

use async_trait::async_trait;
use eatsight::discounts::VoucherDiscount;
use jiff::Zoned;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        orders::{records::OrderUuid, repositories::PgOrdersRepository},
        users::{records::UserUuid, repository::PgUsersRepository},
        vouchers::{
            application::VoucherApplier,
            data::NewVoucher,
            errors::VouchersServiceError,
            records::{
                OrderVoucherRecord, UserVoucherRecord, UserVoucherUuid, VoucherRecord, VoucherUuid,
            },
            repositories::{PgUserVouchersRepository, PgVouchersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgVouchersService {
    db: Db,
    vouchers: PgVouchersRepository,
    user_vouchers: PgUserVouchersRepository,
    users: PgUsersRepository,
    orders: PgOrdersRepository,
    applier: VoucherApplier,
}

impl PgVouchersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            vouchers: PgVouchersRepository::new(),
            user_vouchers: PgUserVouchersRepository::new(),
            users: PgUsersRepository::new(),
            orders: PgOrdersRepository::new(),
            applier: VoucherApplier::new(),
        }
    }
}

#[async_trait]
impl VouchersService for PgVouchersService {
    #[tracing::instrument(
        name = "vouchers.service.create_voucher",
        skip(self, voucher),
        fields(voucher_uuid = %voucher.uuid, voucher_code = %voucher.code),
        err
    )]
    async fn create_voucher(&self, voucher: NewVoucher) -> Result<VoucherRecord, VouchersServiceError> {
        VoucherDiscount::from_terms(voucher.value, voucher.discount_percentage)?;

        let mut tx = self.db.begin().await?;

        let created = self.vouchers.create_voucher(&mut tx, &voucher).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_vouchers(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<VoucherRecord>, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let vouchers = self
            .vouchers
            .list_vouchers(&mut tx, include_inactive, Zoned::now().date())
            .await?;

        tx.commit().await?;

        Ok(vouchers)
    }

    async fn get_voucher_by_code(&self, code: &str) -> Result<VoucherRecord, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let voucher = self.vouchers.get_voucher_by_code(&mut tx, code).await?;

        tx.commit().await?;

        Ok(voucher)
    }

    #[tracing::instrument(
        name = "vouchers.service.redeem_voucher",
        skip(self),
        fields(
            user_uuid = %user,
            voucher_uuid = %voucher,
            user_voucher_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn redeem_voucher(
        &self,
        user: UserUuid,
        voucher: VoucherUuid,
    ) -> Result<UserVoucherRecord, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let voucher = self.vouchers.get_voucher(&mut tx, voucher).await?;
        let balance = self.users.get_user(&mut tx, user).await?.total_points;

        voucher.terms().check(balance, Zoned::now().date())?;

        if self
            .users
            .deduct_points(&mut tx, user, voucher.points_cost)
            .await?
            .is_none()
        {
            let available = self.users.get_user(&mut tx, user).await?.total_points;

            return Err(VouchersServiceError::InsufficientPoints {
                required: voucher.points_cost,
                available,
            });
        }

        let redeemed = self
            .user_vouchers
            .create_user_voucher(&mut tx, UserVoucherUuid::new(), user, voucher.uuid)
            .await?;

        tx.commit().await?;

        Span::current().record("user_voucher_uuid", tracing::field::display(redeemed.uuid));

        info!(
            points_cost = voucher.points_cost,
            voucher_code = %voucher.code,
            "voucher redeemed"
        );

        Ok(redeemed)
    }

    async fn list_user_vouchers(
        &self,
        user: UserUuid,
        used: Option<bool>,
    ) -> Result<Vec<UserVoucherRecord>, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let vouchers = self
            .user_vouchers
            .list_user_vouchers(&mut tx, user, used)
            .await?;

        tx.commit().await?;

        Ok(vouchers)
    }

    #[tracing::instrument(
        name = "vouchers.service.apply_voucher_to_order",
        skip(self),
        fields(user_uuid = %user, order_uuid = %order, user_voucher_uuid = %user_voucher),
        err
    )]
    async fn apply_voucher_to_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        user_voucher: UserVoucherUuid,
    ) -> Result<OrderVoucherRecord, VouchersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.lock_order(&mut tx, order, user).await?;

        let applied = self.applier.apply(&mut tx, &mut order, user_voucher).await?;

        tx.commit().await?;

        info!(
            discount_amount = %applied.discount_amount,
            total_amount = %order.total_amount,
            "voucher applied to order"
        );

        Ok(applied)
    }
}

#[automock]
#[async_trait]
pub trait VouchersService: Send + Sync {
    /// Define a new voucher.
    async fn create_voucher(&self, voucher: NewVoucher) -> Result<VoucherRecord, VouchersServiceError>;

    /// Vouchers on offer today, or every voucher when `include_inactive` is set.
    async fn list_vouchers(
        &self,
        include_inactive: bool,
    ) -> Result<Vec<VoucherRecord>, VouchersServiceError>;

    async fn get_voucher_by_code(&self, code: &str) -> Result<VoucherRecord, VouchersServiceError>;

    /// Buy a voucher with reward points.
    ///
    /// The point debit and the new user voucher commit together; the debit is a
    /// conditional update, so two concurrent redemptions cannot overdraw the balance.
    async fn redeem_voucher(
        &self,
        user: UserUuid,
        voucher: VoucherUuid,
    ) -> Result<UserVoucherRecord, VouchersServiceError>;

    /// The user's vouchers, newest first, optionally filtered by used state.
    async fn list_user_vouchers(
        &self,
        user: UserUuid,
        used: Option<bool>,
    ) -> Result<Vec<UserVoucherRecord>, VouchersServiceError>;

    /// Spend one of the user's vouchers on one of their in-progress orders.
    ///
    /// The cumulative discount on an order is capped at its subtotal.
    async fn apply_voucher_to_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        user_voucher: UserVoucherUuid,
    ) -> Result<OrderVoucherRecord, VouchersServiceError>;
}
