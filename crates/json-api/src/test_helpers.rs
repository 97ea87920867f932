//! Test helpers.

use std::{sync::Arc, time::Duration};

use eatsight_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        menu::MockMenuService,
        orders::MockOrdersService,
        payments::{MockPaymentsService, watch::WatchOptions},
        reviews::MockReviewsService,
        users::{MockUsersService, records::UserUuid},
        vouchers::MockVouchersService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// Fast polling so waiting handlers finish quickly under test.
pub(crate) const TEST_WATCH: WatchOptions = WatchOptions {
    interval: Duration::from_millis(5),
    timeout: Duration::from_millis(200),
};

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Context whose services all panic when called; tests replace the ones they expect.
pub(crate) fn app_context() -> AppContext {
    AppContext {
        users: Arc::new(MockUsersService::new()),
        menu: Arc::new(MockMenuService::new()),
        orders: Arc::new(MockOrdersService::new()),
        vouchers: Arc::new(MockVouchersService::new()),
        payments: Arc::new(MockPaymentsService::new()),
        reviews: Arc::new(MockReviewsService::new()),
        auth: Arc::new(MockAuthService::new()),
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::new(
        AppContext {
            auth: Arc::new(auth),
            ..app_context()
        },
        TEST_WATCH,
    )
}

/// Mount `route` behind an already authenticated [`TEST_USER_UUID`].
pub(crate) fn authenticated_service(app: AppContext, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(State::new(app, TEST_WATCH)))
            .hoop(inject_user)
            .push(route),
    )
}
