//! Download QR Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use eatsight_app::domain::payments::records::PaymentUuid;

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::QrCodeResponse},
    state::State,
};

/// Download QR Code Handler
///
/// Returns the QR code of a QRIS payment and records that it was downloaded.
#[endpoint(
    tags("payments"),
    summary = "Download QR Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "QR code"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment has no QR code"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<QrCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    state
        .app
        .payments
        .download_qr_code(user, PaymentUuid::from_uuid(payment.into_inner()))
        .await
        .map_err(into_status_error)?
        .map(|qr_code| Json(qr_code.into()))
        .ok_or_else(|| StatusError::not_found().brief("QR code not found"))
}
