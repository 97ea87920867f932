//! Orders service errors.

use eatsight::{orders::OrderStatus, pricing::PricingError};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    menu::records::{MenuItemOptionUuid, MenuItemToppingUuid, MenuItemUuid, TableUuid},
    payments::records::PaymentMethodUuid,
    vouchers::{VouchersServiceError, records::VoucherUuid},
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order is {0}")]
    InvalidState(OrderStatus),

    #[error("invalid order")]
    Validation(#[from] OrderValidationError),

    #[error("voucher could not be applied")]
    Voucher(#[source] VouchersServiceError),

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Reasons an order request is rejected before anything is stored.
#[derive(Debug, Error)]
pub enum OrderValidationError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("menu item {0} is not available at this restaurant")]
    UnknownMenuItem(MenuItemUuid),

    #[error("option {0} is not available for this item")]
    UnknownOption(MenuItemOptionUuid),

    #[error("topping {0} is not available for this item")]
    UnknownTopping(MenuItemToppingUuid),

    #[error("table {0} does not belong to this restaurant")]
    UnknownTable(TableUuid),

    #[error("payment method {0} not found")]
    UnknownPaymentMethod(PaymentMethodUuid),

    #[error("no unused copy of voucher {0}")]
    VoucherNotOwned(VoucherUuid),
}

impl From<PricingError> for OrdersServiceError {
    fn from(error: PricingError) -> Self {
        Self::Validation(OrderValidationError::Pricing(error))
    }
}

impl From<Error> for OrdersServiceError {
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
