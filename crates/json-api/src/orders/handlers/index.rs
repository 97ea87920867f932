//! Order Index Handler

use std::sync::Arc;

use eatsight::orders::OrderStatus;
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Order Index Handler
///
/// Lists the caller's orders, newest first, without items.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .or_400("could not parse \"status\"")?;

    let orders = state
        .app
        .orders
        .list_orders(user, status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}
