//! Payments

pub mod data;
pub mod errors;
pub mod qr;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod watch;

pub use errors::{PaymentValidationError, PaymentsServiceError};
pub use service::*;
