//! Payment Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use eatsight_app::domain::payments::{
    records::{PaymentStatusUpdate, PaymentUuid},
    watch::watch_payment_status,
};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Payment Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentStatusResponse {
    pub payment_uuid: Uuid,

    /// `pending`, `completed` or `failed`
    pub status: String,

    /// `pending`, `verified` or `rejected`
    pub verification_status: Option<String>,

    pub message: Option<String>,
    pub checked_at: String,
}

impl From<PaymentStatusUpdate> for PaymentStatusResponse {
    fn from(update: PaymentStatusUpdate) -> Self {
        Self {
            payment_uuid: update.payment_uuid.into_uuid(),
            status: update.status.as_str().to_string(),
            verification_status: update
                .verification_status
                .map(|status| status.as_str().to_string()),
            message: update.message,
            checked_at: update.checked_at.to_string(),
        }
    }
}

/// Payment Status Handler
///
/// With `wait=true` the request is held open until the payment leaves `pending` or
/// the watch times out, and the last observed status is returned.
#[endpoint(
    tags("payments"),
    summary = "Check Payment Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current status"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    wait: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<PaymentStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let payment = PaymentUuid::from_uuid(payment.into_inner());

    if !wait.into_inner().unwrap_or(false) {
        let update = state
            .app
            .payments
            .check_payment_status(user, payment)
            .await
            .map_err(into_status_error)?;

        return Ok(Json(update.into()));
    }

    let mut updates = watch_payment_status(
        Arc::clone(&state.app.payments),
        user,
        payment,
        state.payment_watch,
    );

    let mut last = None;

    while let Some(update) = updates.recv().await {
        debug!(payment_uuid = %payment, "payment status observed");

        last = Some(update.map_err(into_status_error)?);
    }

    last.map(|update| Json(update.into()))
        .ok_or_else(|| StatusError::gateway_timeout().brief("No status observed before timeout"))
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use eatsight::payments::{PaymentStatus, VerificationStatus};
    use eatsight_app::{
        context::AppContext,
        domain::payments::{MockPaymentsService, PaymentsServiceError},
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, app_context, authenticated_service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        authenticated_service(
            AppContext {
                payments: Arc::new(payments),
                ..app_context()
            },
            Router::with_path("payments/{payment}/status").get(handler),
        )
    }

    fn update(payment: PaymentUuid, status: PaymentStatus) -> PaymentStatusUpdate {
        let verification_status = match status {
            PaymentStatus::Pending => VerificationStatus::Pending,
            PaymentStatus::Completed => VerificationStatus::Verified,
            PaymentStatus::Failed => VerificationStatus::Rejected,
        };

        PaymentStatusUpdate {
            payment_uuid: payment,
            status,
            verification_status: Some(verification_status),
            message: None,
            checked_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn returns_current_status_without_waiting() -> TestResult {
        let payment = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_check_payment_status()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == payment)
            .return_once(move |_, _| Ok(update(payment, PaymentStatus::Pending)));

        let mut res = TestClient::get(format!("http://example.com/payments/{payment}/status"))
            .send(&make_service(payments))
            .await;

        let body: PaymentStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn waiting_returns_once_payment_settles() -> TestResult {
        let payment = PaymentUuid::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let mut payments = MockPaymentsService::new();

        payments.expect_check_payment_status().times(3).returning({
            let calls = Arc::clone(&calls);

            move |_, _| {
                let status = if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    PaymentStatus::Pending
                } else {
                    PaymentStatus::Completed
                };

                Ok(update(payment, status))
            }
        });

        let mut res = TestClient::get(format!(
            "http://example.com/payments/{payment}/status?wait=true"
        ))
        .send(&make_service(payments))
        .await;

        let body: PaymentStatusResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "completed");
        assert_eq!(body.verification_status.as_deref(), Some("verified"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        Ok(())
    }

    #[tokio::test]
    async fn waiting_on_unknown_payment_returns_404() {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_check_payment_status()
            .once()
            .returning(|_, _| Err(PaymentsServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/payments/{}/status?wait=true",
            PaymentUuid::new()
        ))
        .send(&make_service(payments))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
