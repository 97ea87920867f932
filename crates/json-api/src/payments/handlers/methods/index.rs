//! Payment Method Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::payments::records::PaymentMethodRecord;

use crate::{extensions::*, payments::errors::into_status_error, state::State};

/// Payment Method Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentMethodResponse {
    pub uuid: Uuid,

    /// `qris`, `debit_card`, `credit_card` or `cash`
    pub kind: String,

    pub card_number_last4: Option<String>,
    pub card_brand: Option<String>,
    pub holder_name: Option<String>,
    pub is_default: bool,
}

impl From<PaymentMethodRecord> for PaymentMethodResponse {
    fn from(method: PaymentMethodRecord) -> Self {
        Self {
            uuid: method.uuid.into_uuid(),
            kind: method.kind.as_str().to_string(),
            card_number_last4: method.card_number_last4,
            card_brand: method.card_brand,
            holder_name: method.holder_name,
            is_default: method.is_default,
        }
    }
}

/// Payment Method Index Handler
///
/// The caller's saved payment methods, default first.
#[endpoint(
    tags("payment-methods"),
    summary = "List Payment Methods",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment methods"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<PaymentMethodResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let methods = state
        .app
        .payments
        .list_payment_methods(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(methods.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight::payments::PaymentType;
    use eatsight_app::{
        context::AppContext,
        domain::payments::{MockPaymentsService, records::PaymentMethodUuid},
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, app_context, authenticated_service};

    use super::*;

    #[tokio::test]
    async fn lists_callers_methods() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_list_payment_methods()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| {
                Ok(vec![PaymentMethodRecord {
                    uuid: PaymentMethodUuid::new(),
                    user_uuid: TEST_USER_UUID,
                    kind: PaymentType::DebitCard,
                    card_number_last4: Some("4242".to_string()),
                    card_brand: Some("Visa".to_string()),
                    holder_name: None,
                    is_default: true,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let service = authenticated_service(
            AppContext {
                payments: Arc::new(payments),
                ..app_context()
            },
            Router::with_path("payment-methods").get(handler),
        );

        let mut res = TestClient::get("http://example.com/payment-methods")
            .send(&service)
            .await;

        let body: Vec<PaymentMethodResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            body.first()
                .is_some_and(|m| m.kind == "debit_card" && m.is_default),
            "unexpected body {body:?}"
        );

        Ok(())
    }
}
