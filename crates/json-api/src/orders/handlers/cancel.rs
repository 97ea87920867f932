//! Cancel Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use eatsight_app::domain::orders::records::OrderUuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Cancel Order Handler
///
/// Cancels one of the caller's in-progress orders and returns it. Vouchers spent on
/// the order are not refunded.
#[endpoint(
    tags("orders"),
    summary = "Cancel Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order cancelled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is no longer in progress"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let order = OrderUuid::from_uuid(order.into_inner());

    let cancelled = state
        .app
        .orders
        .cancel_order(user, order)
        .await
        .map_err(into_status_error)?;

    // An order we do not own surfaces as 404 here.
    let record = state
        .app
        .orders
        .get_order(user, order)
        .await
        .map_err(into_status_error)?;

    if !cancelled {
        return Err(StatusError::conflict().brief(format!("Order is {}", record.status)));
    }

    Ok(Json(record.into()))
}
