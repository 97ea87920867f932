//! Applying an owned voucher to an order inside a caller's transaction.

use eatsight::{orders::OrderStatus, pricing::OrderTotals};
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::domain::{
    orders::{records::OrderRecord, repositories::PgOrdersRepository},
    vouchers::{
        errors::{VoucherStateError, VouchersServiceError},
        records::{OrderVoucherRecord, UserVoucherUuid},
        repositories::{PgOrderVouchersRepository, PgUserVouchersRepository},
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct VoucherApplier {
    orders: PgOrdersRepository,
    user_vouchers: PgUserVouchersRepository,
    order_vouchers: PgOrderVouchersRepository,
}

impl VoucherApplier {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            orders: PgOrdersRepository::new(),
            user_vouchers: PgUserVouchersRepository::new(),
            order_vouchers: PgOrderVouchersRepository::new(),
        }
    }

    /// Spend `user_voucher` on `order` and fold its discount into the order totals.
    ///
    /// `order` must be row-locked by the caller's transaction. Its money columns are
    /// updated in place to match what was written.
    pub(crate) async fn apply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &mut OrderRecord,
        user_voucher: UserVoucherUuid,
    ) -> Result<OrderVoucherRecord, VouchersServiceError> {
        if order.status != OrderStatus::InProgress {
            return Err(VoucherStateError::OrderClosed(order.status).into());
        }

        let Some(claimed) = self
            .user_vouchers
            .claim_user_voucher(tx, user_voucher, order.user_uuid, order.uuid)
            .await?
        else {
            return Err(
                match self
                    .user_vouchers
                    .find_user_voucher(tx, user_voucher, order.user_uuid)
                    .await?
                {
                    Some(_) => VoucherStateError::AlreadyUsed.into(),
                    None => VouchersServiceError::NotFound,
                },
            );
        };

        let discount = claimed.voucher.discount()?;

        let mut totals =
            OrderTotals::with_discount(order.subtotal, order.order_fee, order.discount_amount)?;

        let applied = totals.apply_discount(discount.amount_for(totals.subtotal()));

        debug!(
            order_uuid = %order.uuid,
            voucher_code = %claimed.voucher.code,
            %applied,
            "voucher applied"
        );

        let record = self
            .order_vouchers
            .create_order_voucher(tx, order.uuid, claimed.voucher.uuid, claimed.uuid, applied)
            .await?;

        self.orders.update_discount(tx, order.uuid, &totals).await?;

        order.discount_amount = totals.discount_amount();
        order.total_amount = totals.total_amount();
        order.vouchers.push(record.clone());

        Ok(record)
    }
}
