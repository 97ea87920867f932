//! Voucher Records

use eatsight::{
    discounts::{DiscountError, VoucherDiscount},
    vouchers::RedemptionTerms,
};
use jiff::{Timestamp, civil::Date};
use rust_decimal::Decimal;

use crate::{
    domain::{orders::records::OrderUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Voucher UUID
pub type VoucherUuid = TypedUuid<VoucherRecord>;

/// User Voucher UUID
pub type UserVoucherUuid = TypedUuid<UserVoucherRecord>;

/// Order Voucher UUID
pub type OrderVoucherUuid = TypedUuid<OrderVoucherRecord>;

/// Voucher Record
#[derive(Debug, Clone)]
pub struct VoucherRecord {
    pub uuid: VoucherUuid,
    pub code: String,
    pub description: String,
    pub points_cost: u64,
    pub value: Decimal,
    pub discount_percentage: Option<Decimal>,
    pub expiry_date: Option<Date>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VoucherRecord {
    #[must_use]
    pub fn terms(&self) -> RedemptionTerms {
        RedemptionTerms {
            points_cost: self.points_cost,
            is_active: self.is_active,
            expiry_date: self.expiry_date,
        }
    }

    /// The discount this voucher grants.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored terms are out of range.
    pub fn discount(&self) -> Result<VoucherDiscount, DiscountError> {
        VoucherDiscount::from_terms(self.value, self.discount_percentage)
    }
}

/// A voucher a user bought with points.
#[derive(Debug, Clone)]
pub struct UserVoucherRecord {
    pub uuid: UserVoucherUuid,
    pub user_uuid: UserUuid,
    pub is_used: bool,

    /// Order the voucher was spent on.
    pub order_uuid: Option<OrderUuid>,

    pub date_acquired: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub voucher: VoucherRecord,
}

/// A voucher applied to an order, with the discount it actually contributed.
#[derive(Debug, Clone)]
pub struct OrderVoucherRecord {
    pub uuid: OrderVoucherUuid,
    pub order_uuid: OrderUuid,
    pub voucher_uuid: VoucherUuid,
    pub user_voucher_uuid: UserVoucherUuid,
    pub discount_amount: Decimal,
    pub created_at: Timestamp,
}
