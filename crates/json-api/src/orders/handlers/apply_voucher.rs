//! Apply Voucher Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::{orders::records::OrderUuid, vouchers::records::UserVoucherUuid};

use crate::{
    extensions::*, orders::get::AppliedVoucherResponse, state::State,
    vouchers::errors::into_status_error,
};

/// Apply Voucher Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyVoucherRequest {
    /// A voucher the caller redeemed and has not used yet
    pub user_voucher_uuid: Uuid,
}

/// Apply Voucher Handler
///
/// Spends a redeemed voucher on an in-progress order. The discount is capped so the
/// order never goes below zero.
#[endpoint(
    tags("orders"),
    summary = "Apply Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher applied"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or voucher not found"),
        (status_code = StatusCode::CONFLICT, description = "Voucher or order not usable"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<ApplyVoucherRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AppliedVoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let applied = state
        .app
        .vouchers
        .apply_voucher_to_order(
            user,
            OrderUuid::from_uuid(order.into_inner()),
            UserVoucherUuid::from_uuid(json.into_inner().user_voucher_uuid),
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(applied.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight::orders::OrderStatus;
    use eatsight_app::{
        context::AppContext,
        domain::vouchers::{
            MockVouchersService, VoucherStateError, VouchersServiceError,
            records::{OrderVoucherRecord, OrderVoucherUuid, VoucherUuid},
        },
    };
    use jiff::Timestamp;
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{TEST_USER_UUID, app_context, authenticated_service};

    use super::*;

    fn make_service(vouchers: MockVouchersService) -> Service {
        authenticated_service(
            AppContext {
                vouchers: Arc::new(vouchers),
                ..app_context()
            },
            Router::with_path("orders/{order}/vouchers").post(handler),
        )
    }

    #[tokio::test]
    async fn applies_voucher_and_returns_discount() -> TestResult {
        let order = OrderUuid::new();
        let user_voucher = UserVoucherUuid::new();

        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_apply_voucher_to_order()
            .once()
            .withf(move |user, o, uv| *user == TEST_USER_UUID && *o == order && *uv == user_voucher)
            .return_once(move |_, _, _| {
                Ok(OrderVoucherRecord {
                    uuid: OrderVoucherUuid::new(),
                    order_uuid: order,
                    voucher_uuid: VoucherUuid::new(),
                    user_voucher_uuid: user_voucher,
                    discount_amount: dec!(10000),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post(format!("http://example.com/orders/{order}/vouchers"))
            .json(&json!({ "user_voucher_uuid": user_voucher.into_uuid() }))
            .send(&make_service(vouchers))
            .await;

        let body: AppliedVoucherResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.user_voucher_uuid, user_voucher.into_uuid());
        assert_eq!(body.discount_amount, "10000");

        Ok(())
    }

    #[tokio::test]
    async fn closed_order_returns_409() {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_apply_voucher_to_order().once().return_once(|_, _, _| {
            Err(VouchersServiceError::InvalidState(VoucherStateError::OrderClosed(
                OrderStatus::Completed,
            )))
        });

        let res = TestClient::post(format!("http://example.com/orders/{}/vouchers", OrderUuid::new()))
            .json(&json!({ "user_voucher_uuid": Uuid::now_v7() }))
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn missing_body_field_returns_400() {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_apply_voucher_to_order().never();

        let res = TestClient::post(format!("http://example.com/orders/{}/vouchers", OrderUuid::new()))
            .json(&json!({}))
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
