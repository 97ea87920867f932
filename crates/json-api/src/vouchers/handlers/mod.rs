//! Voucher Handlers

pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod redeem;

#[cfg(test)]
mod tests {
    use eatsight_app::domain::vouchers::records::{VoucherRecord, VoucherUuid};
    use jiff::{Timestamp, civil::date};
    use rust_decimal_macros::dec;

    /// A 500 point voucher worth 10000 off, valid through 2030.
    pub(crate) fn make_voucher(uuid: VoucherUuid) -> VoucherRecord {
        VoucherRecord {
            uuid,
            code: "EAT10K".to_string(),
            description: "10K off your next order".to_string(),
            points_cost: 500,
            value: dec!(10000),
            discount_percentage: None,
            expiry_date: Some(date(2030, 1, 1)),
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
