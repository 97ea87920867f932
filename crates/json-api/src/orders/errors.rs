//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use eatsight_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::InvalidState(status) => {
            StatusError::conflict().brief(format!("Order is {status}"))
        }
        OrdersServiceError::Validation(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        OrdersServiceError::Voucher(source) => crate::vouchers::errors::into_status_error(source),
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
