//! Create Payment Handler

use std::sync::Arc;

use eatsight::payments::PaymentType;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::{
    menu::records::TableUuid,
    orders::records::OrderUuid,
    payments::{
        data::NewPayment,
        records::{PaymentMethodUuid, PaymentUuid},
    },
};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Create Payment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreatePaymentRequest {
    pub uuid: Uuid,
    pub order_uuid: Uuid,

    /// `qris`, `debit_card`, `credit_card` or `cash`
    pub payment_type: String,

    /// Decimal string in rupiah
    pub amount: String,

    pub payment_method_uuid: Option<Uuid>,

    /// Cash only; defaults to the order's table
    pub table_uuid: Option<Uuid>,
}

impl TryFrom<CreatePaymentRequest> for NewPayment {
    type Error = StatusError;

    fn try_from(request: CreatePaymentRequest) -> Result<Self, Self::Error> {
        Ok(NewPayment {
            uuid: PaymentUuid::from_uuid(request.uuid),
            order: OrderUuid::from_uuid(request.order_uuid),
            payment_type: request
                .payment_type
                .parse::<PaymentType>()
                .or_400("could not parse \"payment_type\"")?,
            amount: request
                .amount
                .parse::<Decimal>()
                .or_400("could not parse \"amount\"")?,
            payment_method: request.payment_method_uuid.map(PaymentMethodUuid::from_uuid),
            table: request.table_uuid.map(TableUuid::from_uuid),
        })
    }
}

/// Create Payment Handler
///
/// Opens a pending payment on one of the caller's in-progress orders. QRIS payments
/// come back with their QR code.
#[endpoint(
    tags("payments"),
    summary = "Create Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Payment created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is no longer in progress"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Payment failed validation"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePaymentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let payment = state
        .app
        .payments
        .create_payment(user, json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/payments/{}", payment.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight::orders::OrderStatus;
    use eatsight_app::{
        context::AppContext,
        domain::payments::{MockPaymentsService, PaymentValidationError, PaymentsServiceError},
    };
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        payments::handlers::tests::make_payment,
        test_helpers::{TEST_USER_UUID, app_context, authenticated_service},
    };

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        authenticated_service(
            AppContext {
                payments: Arc::new(payments),
                ..app_context()
            },
            Router::with_path("payments").post(handler),
        )
    }

    #[tokio::test]
    async fn creates_qris_payment() -> TestResult {
        let payment = Uuid::now_v7();
        let order = Uuid::now_v7();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_create_payment()
            .once()
            .withf(move |user, new| {
                *user == TEST_USER_UUID
                    && new.uuid.into_uuid() == payment
                    && new.order.into_uuid() == order
                    && new.payment_type == PaymentType::Qris
                    && new.amount == dec!(45000)
            })
            .return_once(move |_, _| Ok(make_payment(PaymentUuid::from_uuid(payment))));

        let mut res = TestClient::post("http://example.com/payments")
            .json(&json!({
                "uuid": payment,
                "order_uuid": order,
                "payment_type": "qris",
                "amount": "45000",
            }))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/payments/{payment}").as_str()));
        assert!(body.qr_code.is_some(), "expected a QR code");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_amount_returns_400() {
        let mut payments = MockPaymentsService::new();

        payments.expect_create_payment().never();

        let res = TestClient::post("http://example.com/payments")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "order_uuid": Uuid::now_v7(),
                "payment_type": "cash",
                "amount": "lots",
            }))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn service_errors_map_to_statuses() {
        let cases = [
            (
                PaymentsServiceError::InvalidState(OrderStatus::Completed),
                StatusCode::CONFLICT,
            ),
            (
                PaymentsServiceError::Validation(PaymentValidationError::NonPositiveAmount(dec!(0))),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (PaymentsServiceError::NotFound, StatusCode::NOT_FOUND),
        ];

        for (error, expected) in cases {
            let mut payments = MockPaymentsService::new();

            payments.expect_create_payment().once().return_once(|_, _| Err(error));

            let res = TestClient::post("http://example.com/payments")
                .json(&json!({
                    "uuid": Uuid::now_v7(),
                    "order_uuid": Uuid::now_v7(),
                    "payment_type": "cash",
                    "amount": "45000",
                }))
                .send(&make_service(payments))
                .await;

            assert_eq!(res.status_code, Some(expected));
        }
    }
}
