//! Vouchers

pub(crate) mod application;
pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::{VoucherStateError, VouchersServiceError};
pub use service::*;
