//! Get Menu Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::menu::records::{
    MenuItemOptionRecord, MenuItemRecord, MenuItemToppingRecord, MenuItemUuid,
};

use crate::{extensions::*, menu::errors::into_status_error, state::State};

/// Menu Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    pub uuid: Uuid,
    pub restaurant_uuid: Uuid,
    pub name: String,
    pub original_price: String,
    pub discounted_price: Option<String>,

    /// Unit price charged when ordering
    pub price: String,

    pub is_active: bool,
    pub options: Vec<MenuOptionResponse>,
    pub toppings: Vec<MenuToppingResponse>,
}

impl From<MenuItemRecord> for MenuItemResponse {
    fn from(item: MenuItemRecord) -> Self {
        Self {
            price: item.effective_price().to_string(),
            uuid: item.uuid.into_uuid(),
            restaurant_uuid: item.restaurant_uuid.into_uuid(),
            name: item.name,
            original_price: item.original_price.to_string(),
            discounted_price: item.discounted_price.map(|price| price.to_string()),
            is_active: item.is_active,
            options: item.options.into_iter().map(Into::into).collect(),
            toppings: item.toppings.into_iter().map(Into::into).collect(),
        }
    }
}

/// Menu Option Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuOptionResponse {
    pub uuid: Uuid,

    /// Grouping label such as "Size"
    pub option_group: Option<String>,

    pub name: String,
    pub price: String,
}

impl From<MenuItemOptionRecord> for MenuOptionResponse {
    fn from(option: MenuItemOptionRecord) -> Self {
        Self {
            uuid: option.uuid.into_uuid(),
            option_group: option.option_group,
            name: option.name,
            price: option.price.to_string(),
        }
    }
}

/// Menu Topping Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuToppingResponse {
    pub uuid: Uuid,
    pub name: String,
    pub price: String,
}

impl From<MenuItemToppingRecord> for MenuToppingResponse {
    fn from(topping: MenuItemToppingRecord) -> Self {
        Self {
            uuid: topping.uuid.into_uuid(),
            name: topping.name,
            price: topping.price.to_string(),
        }
    }
}

/// Get Menu Item Handler
///
/// One menu item with the options and toppings that can be ordered with it.
#[endpoint(
    tags("menu"),
    summary = "Get Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Menu item found"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let item = state
        .app
        .menu
        .get_menu_item(MenuItemUuid::from_uuid(item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
