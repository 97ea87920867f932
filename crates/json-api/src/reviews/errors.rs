//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use eatsight_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    match error {
        ReviewsServiceError::AlreadyExists => StatusError::conflict().brief("Review already exists"),
        ReviewsServiceError::NotFound => {
            StatusError::not_found().brief("Restaurant or order not found")
        }
        ReviewsServiceError::InvalidReference
        | ReviewsServiceError::MissingRequiredData
        | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::AlreadyReviewed => {
            StatusError::conflict().brief("Order has already been reviewed")
        }
        ReviewsServiceError::Validation(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        ReviewsServiceError::Sql(source) => {
            error!("review storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
