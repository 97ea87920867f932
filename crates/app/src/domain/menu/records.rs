//! Menu Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Restaurant UUID
pub type RestaurantUuid = TypedUuid<RestaurantRecord>;

/// Table UUID
pub type TableUuid = TypedUuid<TableRecord>;

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItemRecord>;

/// Menu Item Option UUID
pub type MenuItemOptionUuid = TypedUuid<MenuItemOptionRecord>;

/// Menu Item Topping UUID
pub type MenuItemToppingUuid = TypedUuid<MenuItemToppingRecord>;

/// Restaurant Record
#[derive(Debug, Clone)]
pub struct RestaurantRecord {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Table Record
#[derive(Debug, Clone)]
pub struct TableRecord {
    pub uuid: TableUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub table_number: String,
    pub capacity: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Menu Item Record
#[derive(Debug, Clone)]
pub struct MenuItemRecord {
    pub uuid: MenuItemUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub name: String,
    pub original_price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Active options; only loaded for a single item.
    pub options: Vec<MenuItemOptionRecord>,

    /// Active toppings; only loaded for a single item.
    pub toppings: Vec<MenuItemToppingRecord>,
}

impl MenuItemRecord {
    /// Unit price charged when ordering: the discounted price when one is set.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.original_price)
    }
}

/// Menu Item Option Record
#[derive(Debug, Clone)]
pub struct MenuItemOptionRecord {
    pub uuid: MenuItemOptionUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub option_group: Option<String>,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Menu Item Topping Record
#[derive(Debug, Clone)]
pub struct MenuItemToppingRecord {
    pub uuid: MenuItemToppingUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
