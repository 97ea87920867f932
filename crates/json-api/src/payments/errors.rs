//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use eatsight_app::domain::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Payment already exists")
        }
        PaymentsServiceError::NotFound => StatusError::not_found().brief("Payment not found"),
        PaymentsServiceError::InvalidReference
        | PaymentsServiceError::MissingRequiredData
        | PaymentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid payment payload")
        }
        PaymentsServiceError::InvalidState(status) => {
            StatusError::conflict().brief(format!("Order is {status}"))
        }
        PaymentsServiceError::Validation(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        PaymentsServiceError::QrCode(source) => {
            error!("QR code generation failed: {source}");

            StatusError::internal_server_error()
        }
        PaymentsServiceError::Deadline(source) => {
            error!("payment deadline out of range: {source}");

            StatusError::internal_server_error()
        }
        PaymentsServiceError::Sql(source) => {
            error!("payment storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
