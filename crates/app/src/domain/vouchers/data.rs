//! Vouchers Data

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::domain::vouchers::records::VoucherUuid;

/// New Voucher Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoucher {
    pub uuid: VoucherUuid,
    pub code: String,
    pub description: String,
    pub points_cost: u64,

    /// Flat discount, used when no percentage is set.
    pub value: Decimal,

    /// Percentage discount in `0..=100`; takes precedence over `value` when non-zero.
    pub discount_percentage: Option<Decimal>,

    pub expiry_date: Option<Date>,
    pub is_active: bool,
}
