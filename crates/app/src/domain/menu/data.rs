//! Menu Data

use rust_decimal::Decimal;

use crate::domain::menu::records::{
    MenuItemOptionUuid, MenuItemToppingUuid, MenuItemUuid, RestaurantUuid, TableUuid,
};

/// New Restaurant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub location: Option<String>,
}

/// New Table Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTable {
    pub uuid: TableUuid,
    pub restaurant: RestaurantUuid,
    pub table_number: String,
    pub capacity: Option<u32>,
}

/// New Menu Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    pub uuid: MenuItemUuid,
    pub restaurant: RestaurantUuid,
    pub name: String,
    pub original_price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub is_active: bool,
}

/// New Menu Item Option Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItemOption {
    pub uuid: MenuItemOptionUuid,
    pub menu_item: MenuItemUuid,

    /// Grouping label such as "Size" or "Spice level".
    pub option_group: Option<String>,

    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

/// New Menu Item Topping Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItemTopping {
    pub uuid: MenuItemToppingUuid,
    pub menu_item: MenuItemUuid,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}
