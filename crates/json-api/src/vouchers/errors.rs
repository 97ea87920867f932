//! Voucher Errors

use salvo::http::StatusError;
use tracing::error;

use eatsight_app::domain::vouchers::VouchersServiceError;

pub(crate) fn into_status_error(error: VouchersServiceError) -> StatusError {
    match error {
        VouchersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Voucher already exists")
        }
        VouchersServiceError::NotFound => StatusError::not_found().brief("Voucher not found"),
        VouchersServiceError::InvalidReference
        | VouchersServiceError::MissingRequiredData
        | VouchersServiceError::InvalidData
        | VouchersServiceError::InvalidTerms(_) => {
            StatusError::bad_request().brief("Invalid voucher payload")
        }
        VouchersServiceError::InvalidState(source) => {
            StatusError::conflict().brief(source.to_string())
        }
        error @ VouchersServiceError::InsufficientPoints { .. } => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        VouchersServiceError::Totals(source) => {
            error!("order totals rejected a voucher discount: {source}");

            StatusError::internal_server_error()
        }
        VouchersServiceError::Sql(source) => {
            error!("voucher storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use eatsight_app::domain::vouchers::VoucherStateError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (VouchersServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                VouchersServiceError::InvalidState(VoucherStateError::AlreadyUsed),
                StatusCode::CONFLICT,
            ),
            (
                VouchersServiceError::InsufficientPoints {
                    required: 500,
                    available: 499,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (VouchersServiceError::InvalidData, StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}
