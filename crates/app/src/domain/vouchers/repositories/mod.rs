//! Voucher Repositories

mod order_vouchers;
mod user_vouchers;
mod vouchers;

pub(crate) use order_vouchers::PgOrderVouchersRepository;
pub(crate) use user_vouchers::PgUserVouchersRepository;
pub(crate) use vouchers::PgVouchersRepository;
