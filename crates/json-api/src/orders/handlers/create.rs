//! Create Order Handler

use std::sync::Arc;

use eatsight::orders::OrderMode;
use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::{
    menu::records::{MenuItemOptionUuid, MenuItemToppingUuid, MenuItemUuid, RestaurantUuid, TableUuid},
    orders::{
        data::{NewOrder, NewOrderItem, NewOrderItemOption, NewOrderItemTopping},
        records::{OrderItemUuid, OrderUuid},
    },
    payments::records::PaymentMethodUuid,
    vouchers::records::VoucherUuid,
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Create Order Request
///
/// Prices are never accepted from the client; every line is priced from the menu.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub uuid: Uuid,
    pub restaurant_uuid: Uuid,

    /// `dine_in` or `takeaway`
    pub order_mode: String,

    pub table_uuid: Option<Uuid>,
    pub payment_method_uuid: Option<Uuid>,

    /// Decimal string; defaults to zero
    pub order_fee: Option<String>,

    pub items: Vec<CreateOrderItemRequest>,

    /// Voucher definitions to spend; each consumes one unused copy the caller owns
    #[serde(default)]
    pub vouchers: Vec<Uuid>,
}

/// Create Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderItemRequest {
    pub uuid: Uuid,
    pub menu_item_uuid: Uuid,
    pub quantity: u32,
    pub special_instructions: Option<String>,

    #[serde(default)]
    pub options: Vec<CreateOrderExtraRequest>,

    #[serde(default)]
    pub toppings: Vec<CreateOrderExtraRequest>,
}

/// A chosen option or topping
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderExtraRequest {
    pub uuid: Uuid,
    pub quantity: u32,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = StatusError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let order_fee = request
            .order_fee
            .as_deref()
            .map(str::parse::<Decimal>)
            .transpose()
            .or_400("could not parse \"order_fee\"")?
            .unwrap_or(Decimal::ZERO);

        Ok(NewOrder {
            uuid: OrderUuid::from_uuid(request.uuid),
            restaurant: RestaurantUuid::from_uuid(request.restaurant_uuid),
            order_mode: request
                .order_mode
                .parse::<OrderMode>()
                .or_400("could not parse \"order_mode\"")?,
            table: request.table_uuid.map(TableUuid::from_uuid),
            payment_method: request.payment_method_uuid.map(PaymentMethodUuid::from_uuid),
            order_fee,
            items: request.items.into_iter().map(Into::into).collect(),
            vouchers: request.vouchers.into_iter().map(VoucherUuid::from_uuid).collect(),
        })
    }
}

impl From<CreateOrderItemRequest> for NewOrderItem {
    fn from(item: CreateOrderItemRequest) -> Self {
        Self {
            uuid: OrderItemUuid::from_uuid(item.uuid),
            menu_item: MenuItemUuid::from_uuid(item.menu_item_uuid),
            quantity: item.quantity,
            special_instructions: item.special_instructions,
            options: item
                .options
                .into_iter()
                .map(|option| NewOrderItemOption {
                    option: MenuItemOptionUuid::from_uuid(option.uuid),
                    quantity: option.quantity,
                })
                .collect(),
            toppings: item
                .toppings
                .into_iter()
                .map(|topping| NewOrderItemTopping {
                    topping: MenuItemToppingUuid::from_uuid(topping.uuid),
                    quantity: topping.quantity,
                })
                .collect(),
        }
    }
}

/// Create Order Handler
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Order already exists or voucher unusable"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Order failed validation"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .create_order(user, json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight::pricing::PricingError;
    use eatsight_app::{
        context::AppContext,
        domain::orders::{MockOrdersService, OrderValidationError, OrdersServiceError},
    };
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
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
            Router::with_path("orders").post(handler),
        )
    }

    #[tokio::test]
    async fn creates_order_from_request() -> TestResult {
        let order = Uuid::now_v7();
        let item = Uuid::now_v7();
        let topping = Uuid::now_v7();

        let mut orders = MockOrdersService::new();

        orders
            .expect_create_order()
            .once()
            .withf(move |user, new| {
                *user == TEST_USER_UUID
                    && new.uuid.into_uuid() == order
                    && new.order_mode == OrderMode::DineIn
                    && new.order_fee == dec!(2500)
                    && new.items.len() == 1
                    && new.items.first().is_some_and(|line| {
                        line.menu_item.into_uuid() == item
                            && line.quantity == 2
                            && line.toppings.len() == 1
                    })
            })
            .return_once(move |_, _| Ok(make_order(OrderUuid::from_uuid(order))));

        let mut res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "uuid": order,
                "restaurant_uuid": Uuid::now_v7(),
                "order_mode": "dine_in",
                "order_fee": "2500",
                "items": [{
                    "uuid": Uuid::now_v7(),
                    "menu_item_uuid": item,
                    "quantity": 2,
                    "toppings": [{ "uuid": topping, "quantity": 1 }],
                }],
            }))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{order}").as_str()));
        assert_eq!(body.uuid, order);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_mode_returns_400() {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().never();

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "restaurant_uuid": Uuid::now_v7(),
                "order_mode": "delivery",
                "items": [],
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn empty_order_returns_422() {
        let mut orders = MockOrdersService::new();

        orders.expect_create_order().once().return_once(|_, _| {
            Err(OrdersServiceError::Validation(OrderValidationError::Pricing(
                PricingError::NoItems,
            )))
        });

        let res = TestClient::post("http://example.com/orders")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "restaurant_uuid": Uuid::now_v7(),
                "order_mode": "takeaway",
                "items": [],
            }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
    }
}
