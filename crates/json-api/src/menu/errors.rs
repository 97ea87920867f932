//! Menu Errors

use salvo::http::StatusError;
use tracing::error;

use eatsight_app::domain::menu::MenuServiceError;

pub(crate) fn into_status_error(error: MenuServiceError) -> StatusError {
    match error {
        MenuServiceError::AlreadyExists => {
            StatusError::conflict().brief("Menu resource already exists")
        }
        MenuServiceError::NotFound => StatusError::not_found().brief("Menu resource not found"),
        MenuServiceError::InvalidReference
        | MenuServiceError::MissingRequiredData
        | MenuServiceError::InvalidData => StatusError::bad_request().brief("Invalid menu payload"),
        MenuServiceError::Price(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        MenuServiceError::Sql(source) => {
            error!("menu storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
