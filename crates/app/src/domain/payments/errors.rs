//! Payments service errors.

use eatsight::orders::OrderStatus;
use rust_decimal::Decimal;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    menu::records::TableUuid,
    payments::{qr::QrCodeError, records::PaymentMethodUuid},
};

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("payment already exists")]
    AlreadyExists,

    #[error("payment not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order is {0}")]
    InvalidState(OrderStatus),

    #[error("invalid payment")]
    Validation(#[from] PaymentValidationError),

    #[error("failed to generate QR code")]
    QrCode(#[from] QrCodeError),

    #[error("payment deadline out of range")]
    Deadline(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Reasons a payment request is rejected before anything is stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentValidationError {
    #[error("payment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("payment amount {0} exceeds the largest storable amount")]
    AmountTooLarge(Decimal),

    #[error("payment method {0} not found")]
    UnknownPaymentMethod(PaymentMethodUuid),

    #[error("table {0} does not belong to the order's restaurant")]
    UnknownTable(TableUuid),

    #[error("card number must be the last four digits")]
    InvalidCardNumber,
}

impl From<Error> for PaymentsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
