//! Redeem Voucher Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use eatsight_app::domain::vouchers::records::VoucherUuid;

use crate::{
    extensions::*,
    state::State,
    vouchers::{errors::into_status_error, mine::UserVoucherResponse},
};

/// Redeem Voucher Handler
///
/// Buys a copy of the voucher with the caller's reward points.
#[endpoint(
    tags("vouchers"),
    summary = "Redeem Voucher",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Voucher redeemed"),
        (status_code = StatusCode::NOT_FOUND, description = "Voucher not found"),
        (status_code = StatusCode::CONFLICT, description = "Voucher inactive or expired"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Not enough points"),
    ),
)]
pub(crate) async fn handler(
    voucher: PathParam<Uuid>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserVoucherResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let redeemed = state
        .app
        .vouchers
        .redeem_voucher(user, VoucherUuid::from_uuid(voucher.into_inner()))
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(redeemed.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{
        context::AppContext,
        domain::vouchers::{
            MockVouchersService, VouchersServiceError,
            records::{UserVoucherRecord, UserVoucherUuid},
        },
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        test_helpers::{TEST_USER_UUID, app_context, authenticated_service},
        vouchers::handlers::tests::make_voucher,
    };

    use super::*;

    fn make_service(vouchers: MockVouchersService) -> Service {
        authenticated_service(
            AppContext {
                vouchers: Arc::new(vouchers),
                ..app_context()
            },
            Router::with_path("vouchers/{voucher}/redeem").post(handler),
        )
    }

    #[tokio::test]
    async fn redeems_voucher_for_caller() -> TestResult {
        let voucher = VoucherUuid::new();

        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_redeem_voucher()
            .once()
            .withf(move |user, v| *user == TEST_USER_UUID && *v == voucher)
            .return_once(move |_, _| {
                Ok(UserVoucherRecord {
                    uuid: UserVoucherUuid::new(),
                    user_uuid: TEST_USER_UUID,
                    is_used: false,
                    order_uuid: None,
                    date_acquired: Timestamp::UNIX_EPOCH,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                    voucher: make_voucher(voucher),
                })
            });

        let mut res = TestClient::post(format!("http://example.com/vouchers/{voucher}/redeem"))
            .send(&make_service(vouchers))
            .await;

        let body: UserVoucherResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert!(!body.is_used);
        assert_eq!(body.voucher.uuid, voucher.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn insufficient_points_returns_422() {
        let mut vouchers = MockVouchersService::new();

        vouchers.expect_redeem_voucher().once().return_once(|_, _| {
            Err(VouchersServiceError::InsufficientPoints {
                required: 500,
                available: 120,
            })
        });

        let res = TestClient::post(format!("http://example.com/vouchers/{}/redeem", VoucherUuid::new()))
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[tokio::test]
    async fn unknown_voucher_returns_404() {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_redeem_voucher()
            .once()
            .return_once(|_, _| Err(VouchersServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/vouchers/{}/redeem", VoucherUuid::new()))
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
