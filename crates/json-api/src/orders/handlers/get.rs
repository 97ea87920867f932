//! Get Order Handler

use std::{string::ToString, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::{
    orders::records::{OrderItemOptionRecord, OrderItemRecord, OrderItemToppingRecord, OrderRecord, OrderUuid},
    vouchers::records::OrderVoucherRecord,
};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
///
/// Amounts are decimal strings in rupiah.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub restaurant_uuid: Uuid,

    /// `in_progress`, `completed` or `cancelled`
    pub status: String,

    /// `dine_in` or `takeaway`
    pub order_mode: String,

    pub table_uuid: Option<Uuid>,
    pub payment_method_uuid: Option<Uuid>,
    pub subtotal: String,
    pub order_fee: String,
    pub discount_amount: String,
    pub total_amount: String,
    pub is_reviewed: bool,

    /// Empty in list responses
    pub items: Vec<OrderItemResponse>,

    /// Empty in list responses
    pub vouchers: Vec<AppliedVoucherResponse>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            restaurant_uuid: order.restaurant_uuid.into_uuid(),
            status: order.status.as_str().to_string(),
            order_mode: order.order_mode.as_str().to_string(),
            table_uuid: order.table_uuid.map(|uuid| uuid.into_uuid()),
            payment_method_uuid: order.payment_method_uuid.map(|uuid| uuid.into_uuid()),
            subtotal: order.subtotal.to_string(),
            order_fee: order.order_fee.to_string(),
            discount_amount: order.discount_amount.to_string(),
            total_amount: order.total_amount.to_string(),
            is_reviewed: order.is_reviewed,
            items: order.items.into_iter().map(Into::into).collect(),
            vouchers: order.vouchers.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub menu_item_uuid: Uuid,
    pub quantity: u32,

    /// Unit price when the order was placed
    pub price: String,

    pub special_instructions: Option<String>,
    pub options: Vec<OrderExtraResponse>,
    pub toppings: Vec<OrderExtraResponse>,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            menu_item_uuid: item.menu_item_uuid.into_uuid(),
            quantity: item.quantity,
            price: item.price.to_string(),
            special_instructions: item.special_instructions,
            options: item.options.into_iter().map(Into::into).collect(),
            toppings: item.toppings.into_iter().map(Into::into).collect(),
        }
    }
}

/// An option or topping chosen for an order item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderExtraResponse {
    /// The menu option or topping
    pub uuid: Uuid,
    pub quantity: u32,
    pub price: String,
}

impl From<OrderItemOptionRecord> for OrderExtraResponse {
    fn from(option: OrderItemOptionRecord) -> Self {
        Self {
            uuid: option.option_uuid.into_uuid(),
            quantity: option.quantity,
            price: option.price.to_string(),
        }
    }
}

impl From<OrderItemToppingRecord> for OrderExtraResponse {
    fn from(topping: OrderItemToppingRecord) -> Self {
        Self {
            uuid: topping.topping_uuid.into_uuid(),
            quantity: topping.quantity,
            price: topping.price.to_string(),
        }
    }
}

/// Applied Voucher Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedVoucherResponse {
    pub voucher_uuid: Uuid,
    pub user_voucher_uuid: Uuid,
    pub discount_amount: String,
    pub created_at: String,
}

impl From<OrderVoucherRecord> for AppliedVoucherResponse {
    fn from(applied: OrderVoucherRecord) -> Self {
        Self {
            voucher_uuid: applied.voucher_uuid.into_uuid(),
            user_voucher_uuid: applied.user_voucher_uuid.into_uuid(),
            discount_amount: applied.discount_amount.to_string(),
            created_at: applied.created_at.to_string(),
        }
    }
}

/// Get Order Handler
///
/// Returns one of the caller's orders with its items and vouchers.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user, OrderUuid::from_uuid(order.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{context::AppContext, domain::orders::{MockOrdersService, OrdersServiceError}};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{TEST_USER_UUID, app_context, authenticated_service},
    };

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        authenticated_service(
            AppContext {
                orders: Arc::new(orders),
                ..app_context()
            },
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn returns_order_with_amounts_as_strings() -> TestResult {
        let order = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == order)
            .return_once(move |_, _| Ok(make_order(order)));

        let mut res = TestClient::get(format!("http://example.com/orders/{order}"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, order.into_uuid());
        assert_eq!(body.status, "in_progress");
        assert_eq!(body.total_amount, "45000");
        assert_eq!(body.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn someone_elses_order_returns_404() {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn invalid_uuid_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_get_order().never();

        let res = TestClient::get("http://example.com/orders/123")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
