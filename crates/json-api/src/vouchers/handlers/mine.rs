//! My Vouchers Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::vouchers::records::UserVoucherRecord;

use crate::{
    extensions::*,
    state::State,
    vouchers::{errors::into_status_error, index::VoucherResponse},
};

/// User Voucher Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserVoucherResponse {
    pub uuid: Uuid,
    pub is_used: bool,

    /// Order the voucher was spent on
    pub order_uuid: Option<Uuid>,

    pub date_acquired: String,
    pub voucher: VoucherResponse,
}

impl From<UserVoucherRecord> for UserVoucherResponse {
    fn from(user_voucher: UserVoucherRecord) -> Self {
        Self {
            uuid: user_voucher.uuid.into_uuid(),
            is_used: user_voucher.is_used,
            order_uuid: user_voucher.order_uuid.map(|uuid| uuid.into_uuid()),
            date_acquired: user_voucher.date_acquired.to_string(),
            voucher: user_voucher.voucher.into(),
        }
    }
}

/// My Vouchers Handler
///
/// The caller's redeemed vouchers, newest first.
#[endpoint(
    tags("vouchers"),
    summary = "List My Vouchers",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Redeemed vouchers"),
    ),
)]
pub(crate) async fn handler(
    used: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<UserVoucherResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let vouchers = state
        .app
        .vouchers
        .list_user_vouchers(user, used.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(vouchers.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{
        context::AppContext,
        domain::{
            orders::records::OrderUuid,
            vouchers::{
                MockVouchersService,
                records::{UserVoucherUuid, VoucherUuid},
            },
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
            Router::with_path("vouchers/mine").get(handler),
        )
    }

    #[tokio::test]
    async fn filters_by_used_state() -> TestResult {
        let order = OrderUuid::new();

        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_list_user_vouchers()
            .once()
            .withf(|user, used| *user == TEST_USER_UUID && *used == Some(true))
            .return_once(move |_, _| {
                Ok(vec![UserVoucherRecord {
                    uuid: UserVoucherUuid::new(),
                    user_uuid: TEST_USER_UUID,
                    is_used: true,
                    order_uuid: Some(order),
                    date_acquired: Timestamp::UNIX_EPOCH,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                    voucher: make_voucher(VoucherUuid::new()),
                }])
            });

        let mut res = TestClient::get("http://example.com/vouchers/mine?used=true")
            .send(&make_service(vouchers))
            .await;

        let body: Vec<UserVoucherResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            body.first().is_some_and(|v| v.is_used && v.order_uuid == Some(order.into_uuid())),
            "unexpected body {body:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn no_filter_lists_everything() {
        let mut vouchers = MockVouchersService::new();

        vouchers
            .expect_list_user_vouchers()
            .once()
            .withf(|_, used| used.is_none())
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/vouchers/mine")
            .send(&make_service(vouchers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }
}
