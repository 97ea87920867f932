//! Vouchers service errors.

use eatsight::{
    discounts::DiscountError, orders::OrderStatus, pricing::PricingError,
    vouchers::RedemptionError,
};
use jiff::civil::Date;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VouchersServiceError {
    #[error("voucher already exists")]
    AlreadyExists,

    #[error("voucher not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("voucher cannot be used")]
    InvalidState(#[from] VoucherStateError),

    #[error("not enough points: required {required}, available {available}")]
    InsufficientPoints { required: u64, available: u64 },

    #[error("invalid voucher terms")]
    InvalidTerms(#[from] DiscountError),

    #[error("order totals are inconsistent")]
    Totals(#[from] PricingError),

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Why a voucher or its target order is not in a usable state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherStateError {
    #[error("voucher is inactive")]
    Inactive,

    #[error("voucher expired on {0}")]
    Expired(Date),

    #[error("voucher has already been used")]
    AlreadyUsed,

    #[error("order is {0}")]
    OrderClosed(OrderStatus),
}

impl From<RedemptionError> for VouchersServiceError {
    fn from(error: RedemptionError) -> Self {
        match error {
            RedemptionError::Inactive => VoucherStateError::Inactive.into(),
            RedemptionError::Expired(date) => VoucherStateError::Expired(date).into(),
            RedemptionError::InsufficientPoints {
                required,
                available,
            } => Self::InsufficientPoints {
                required,
                available,
            },
        }
    }
}

impl From<Error> for VouchersServiceError {
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

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn redemption_errors_map_to_service_errors() {
        let expired = VouchersServiceError::from(RedemptionError::Expired(date(2026, 1, 1)));

        assert!(
            matches!(
                expired,
                VouchersServiceError::InvalidState(VoucherStateError::Expired(_))
            ),
            "expected Expired, got {expired:?}"
        );

        let short = VouchersServiceError::from(RedemptionError::InsufficientPoints {
            required: 10,
            available: 3,
        });

        assert!(
            matches!(
                short,
                VouchersServiceError::InsufficientPoints {
                    required: 10,
                    available: 3
                }
            ),
            "expected InsufficientPoints, got {short:?}"
        );
    }
}
