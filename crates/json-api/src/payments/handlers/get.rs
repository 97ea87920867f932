//! Get Payment Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::payments::records::{
    PaymentRecord, PaymentUuid, PaymentVerificationRecord, QrCodeRecord,
};

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub payment_method_uuid: Option<Uuid>,

    /// `qris`, `debit_card`, `credit_card` or `cash`
    pub payment_type: String,

    /// Decimal string in rupiah
    pub amount: String,

    /// `pending`, `completed` or `failed`
    pub status: String,

    pub transaction_id: Option<String>,
    pub payment_deadline: String,
    pub payment_date: Option<String>,
    pub created_at: String,

    /// QRIS payments only; absent in list responses
    pub qr_code: Option<QrCodeResponse>,

    /// Absent in list responses
    pub verification: Option<VerificationResponse>,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        Self {
            uuid: payment.uuid.into_uuid(),
            order_uuid: payment.order_uuid.into_uuid(),
            payment_method_uuid: payment.payment_method_uuid.map(|uuid| uuid.into_uuid()),
            payment_type: payment.payment_type.as_str().to_string(),
            amount: payment.amount.to_string(),
            status: payment.status.as_str().to_string(),
            transaction_id: payment.transaction_id,
            payment_deadline: payment.payment_deadline.to_string(),
            payment_date: payment.payment_date.map(|at| at.to_string()),
            created_at: payment.created_at.to_string(),
            qr_code: payment.qr_code.map(Into::into),
            verification: payment.verification.map(Into::into),
        }
    }
}

/// QR Code Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QrCodeResponse {
    pub uuid: Uuid,

    /// Payment URI encoded in the image
    pub qr_data: String,

    pub qr_image_path: String,
    pub is_downloaded: bool,
    pub is_shared: bool,
    pub expiry_time: String,
}

impl From<QrCodeRecord> for QrCodeResponse {
    fn from(qr_code: QrCodeRecord) -> Self {
        Self {
            uuid: qr_code.uuid.into_uuid(),
            qr_data: qr_code.qr_data,
            qr_image_path: qr_code.qr_image_path,
            is_downloaded: qr_code.is_downloaded,
            is_shared: qr_code.is_shared,
            expiry_time: qr_code.expiry_time.to_string(),
        }
    }
}

/// Verification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerificationResponse {
    /// `qris`, `card` or `cash`
    pub verification_type: String,

    /// `pending`, `verified` or `rejected`
    pub verification_status: String,

    pub verification_message: Option<String>,
    pub cashier_name: Option<String>,
    pub table_uuid: Option<Uuid>,
    pub verified_at: Option<String>,
}

impl From<PaymentVerificationRecord> for VerificationResponse {
    fn from(verification: PaymentVerificationRecord) -> Self {
        Self {
            verification_type: verification.verification_type.as_str().to_string(),
            verification_status: verification.verification_status.as_str().to_string(),
            verification_message: verification.verification_message,
            cashier_name: verification.cashier_name,
            table_uuid: verification.table_uuid.map(|uuid| uuid.into_uuid()),
            verified_at: verification.verified_at.map(|at| at.to_string()),
        }
    }
}

/// Get Payment Handler
#[endpoint(
    tags("payments"),
    summary = "Get Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment found"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
    ),
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let payment = state
        .app
        .payments
        .get_payment(user, PaymentUuid::from_uuid(payment.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{
        context::AppContext,
        domain::payments::{MockPaymentsService, PaymentsServiceError},
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
            Router::with_path("payments/{payment}").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_payment_with_relations() -> TestResult {
        let payment = PaymentUuid::new();

        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .withf(move |user, p| *user == TEST_USER_UUID && *p == payment)
            .return_once(move |_, _| Ok(make_payment(payment)));

        let mut res = TestClient::get(format!("http://example.com/payments/{payment}"))
            .send(&make_service(payments))
            .await;

        let body: PaymentResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.payment_type, "qris");
        assert_eq!(body.status, "pending");
        assert_eq!(body.amount, "45000");
        assert!(body.qr_code.is_some(), "QRIS payment should carry its QR code");
        assert_eq!(
            body.verification.map(|v| v.verification_type),
            Some("qris".to_string())
        );

        Ok(())
    }

    #[tokio::test]
    async fn someone_elses_payment_returns_404() {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_payment()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/payments/{}", PaymentUuid::new()))
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
