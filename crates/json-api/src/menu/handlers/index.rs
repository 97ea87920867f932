//! Menu Item Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::menu::records::{MenuItemRecord, RestaurantUuid};

use crate::{extensions::*, menu::errors::into_status_error, state::State};

/// Menu Item Summary Response
///
/// Prices are decimal strings in rupiah.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemSummaryResponse {
    pub uuid: Uuid,
    pub restaurant_uuid: Uuid,
    pub name: String,
    pub original_price: String,
    pub discounted_price: Option<String>,

    /// Unit price charged when ordering
    pub price: String,
}

impl From<MenuItemRecord> for MenuItemSummaryResponse {
    fn from(item: MenuItemRecord) -> Self {
        Self {
            price: item.effective_price().to_string(),
            uuid: item.uuid.into_uuid(),
            restaurant_uuid: item.restaurant_uuid.into_uuid(),
            name: item.name,
            original_price: item.original_price.to_string(),
            discounted_price: item.discounted_price.map(|price| price.to_string()),
        }
    }
}

/// Menu Item Index Handler
///
/// The orderable items of a restaurant, by name.
#[endpoint(
    tags("menu"),
    summary = "List Menu Items",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Active menu items"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<MenuItemSummaryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = state
        .app
        .menu
        .list_menu_items(RestaurantUuid::from_uuid(restaurant.into_inner()), false)
        .await
        .map_err(into_status_error)?;

    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{
        context::AppContext,
        domain::menu::{MenuServiceError, MockMenuService, records::MenuItemUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        menu::handlers::tests::make_menu_item,
        test_helpers::{app_context, authenticated_service},
    };

    use super::*;

    fn make_service(menu: MockMenuService) -> Service {
        authenticated_service(
            AppContext {
                menu: Arc::new(menu),
                ..app_context()
            },
            Router::with_path("restaurants/{restaurant}/menu-items").get(handler),
        )
    }

    #[tokio::test]
    async fn lists_active_items_with_effective_price() -> TestResult {
        let restaurant = RestaurantUuid::new();
        let item = MenuItemUuid::new();

        let mut menu = MockMenuService::new();

        menu.expect_list_menu_items()
            .once()
            .withf(move |r, include_inactive| *r == restaurant && !*include_inactive)
            .return_once(move |_, _| Ok(vec![make_menu_item(item, restaurant)]));

        let mut res = TestClient::get(format!(
            "http://example.com/restaurants/{restaurant}/menu-items"
        ))
        .send(&make_service(menu))
        .await;

        let body: Vec<MenuItemSummaryResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            body.first().is_some_and(|i| i.uuid == item.into_uuid()
                && i.price == "30000"
                && i.original_price == "35000"),
            "unexpected body {body:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_restaurant_returns_404() {
        let mut menu = MockMenuService::new();

        menu.expect_list_menu_items()
            .once()
            .return_once(|_, _| Err(MenuServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/restaurants/{}/menu-items",
            Uuid::now_v7()
        ))
        .send(&make_service(menu))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
