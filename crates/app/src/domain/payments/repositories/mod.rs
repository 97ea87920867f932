//! Payment Repositories

mod payment_methods;
mod payments;
mod qr_codes;
mod verifications;

pub(crate) use payment_methods::PgPaymentMethodsRepository;
pub(crate) use payments::{PgPaymentsRepository, Settlement};
pub(crate) use qr_codes::PgQrCodesRepository;
pub(crate) use verifications::PgVerificationsRepository;
