//! Payment Index Handler

use std::sync::Arc;

use eatsight::payments::PaymentStatus;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
    state::State,
};

/// Payment Index Handler
///
/// The caller's payments, newest first. QR codes and verification records are
/// only included by the single payment endpoint.
#[endpoint(
    tags("payments"),
    summary = "List Payments",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payments"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<PaymentResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<PaymentStatus>())
        .transpose()
        .or_400("could not parse \"status\"")?;

    let payments = state
        .app
        .payments
        .list_payments(user, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{
        context::AppContext,
        domain::payments::{
            MockPaymentsService,
            records::{PaymentRecord, PaymentUuid},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
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
            Router::with_path("payments").get(handler),
        )
    }

    #[tokio::test]
    async fn filters_by_status() -> TestResult {
        let payment = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_list_payments()
            .once()
            .withf(|user, status| *user == TEST_USER_UUID && *status == Some(PaymentStatus::Pending))
            .return_once(move |_, _| {
                Ok(vec![PaymentRecord {
                    qr_code: None,
                    verification: None,
                    ..make_payment(payment)
                }])
            });

        let mut res = TestClient::get("http://example.com/payments?status=pending")
            .send(&make_service(payments))
            .await;

        let body: Vec<PaymentResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            body.first().is_some_and(|p| p.uuid == payment.into_uuid() && p.qr_code.is_none()),
            "unexpected body {body:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_returns_400() {
        let mut payments = MockPaymentsService::new();

        payments.expect_list_payments().never();

        let res = TestClient::get("http://example.com/payments?status=refunded")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
