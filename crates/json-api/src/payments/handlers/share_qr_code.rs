//! Share QR Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use eatsight_app::domain::payments::records::PaymentUuid;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Share QR Code Handler
///
/// Records that the QR code of a QRIS payment was shared.
#[endpoint(
    tags("payments"),
    summary = "Share QR Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Share recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment has no QR code"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let shared = state
        .app
        .payments
        .share_qr_code(user, PaymentUuid::from_uuid(payment.into_inner()))
        .await
        .map_err(into_status_error)?;

    if !shared {
        return Err(StatusError::not_found().brief("QR code not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
