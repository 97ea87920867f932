//! Create Payment Method Handler

use std::sync::Arc;

use eatsight::payments::PaymentType;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::payments::{data::NewPaymentMethod, records::PaymentMethodUuid};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, methods::index::PaymentMethodResponse},
    state::State,
};

/// Create Payment Method Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentMethodRequest {
    pub uuid: Uuid,

    /// `qris`, `debit_card`, `credit_card` or `cash`
    pub kind: String,

    /// Last four digits only
    pub card_number_last4: Option<String>,

    pub card_brand: Option<String>,
    pub holder_name: Option<String>,

    /// Replaces the current default
    #[serde(default)]
    pub is_default: bool,
}

/// Create Payment Method Handler
#[endpoint(
    tags("payment-methods"),
    summary = "Create Payment Method",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payment method saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid card number"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentMethodRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentMethodResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let request = json.into_inner();

    let method = state
        .app
        .payments
        .create_payment_method(
            user,
            NewPaymentMethod {
                uuid: PaymentMethodUuid::from_uuid(request.uuid),
                kind: request
                    .kind
                    .parse::<PaymentType>()
                    .or_400("could not parse \"kind\"")?,
                card_number_last4: request.card_number_last4,
                card_brand: request.card_brand,
                holder_name: request.holder_name,
                is_default: request.is_default,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(method.into()))
}
