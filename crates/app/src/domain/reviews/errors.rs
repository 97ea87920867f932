//! Reviews service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("review already exists")]
    AlreadyExists,

    #[error("review not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("order has already been reviewed")]
    AlreadyReviewed,

    #[error("invalid review")]
    Validation(#[from] ReviewValidationError),

    #[error("storage error")]
    Sql(#[source] Error),
}

/// Reasons a review is rejected before anything is stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewValidationError {
    #[error("rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),

    #[error("order was placed at another restaurant")]
    OrderFromAnotherRestaurant,
}

impl From<Error> for ReviewsServiceError {
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
