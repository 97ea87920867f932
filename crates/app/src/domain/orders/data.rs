//! Orders Data

use eatsight::orders::OrderMode;
use rust_decimal::Decimal;

use crate::domain::{
    menu::records::{MenuItemOptionUuid, MenuItemToppingUuid, MenuItemUuid, RestaurantUuid, TableUuid},
    orders::records::{OrderItemUuid, OrderUuid},
    payments::records::PaymentMethodUuid,
    vouchers::records::VoucherUuid,
};

/// New Order Data
///
/// Prices are never taken from the caller; every line is priced from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub restaurant: RestaurantUuid,
    pub order_mode: OrderMode,
    pub table: Option<TableUuid>,
    pub payment_method: Option<PaymentMethodUuid>,

    /// Service fee added on top of the subtotal.
    pub order_fee: Decimal,

    pub items: Vec<NewOrderItem>,

    /// Vouchers to apply, each consuming one of the user's unused copies.
    pub vouchers: Vec<VoucherUuid>,
}

/// New Order Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
    pub special_instructions: Option<String>,
    pub options: Vec<NewOrderItemOption>,
    pub toppings: Vec<NewOrderItemTopping>,
}

/// Option selected for a new order item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItemOption {
    pub option: MenuItemOptionUuid,
    pub quantity: u32,
}

/// Topping selected for a new order item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItemTopping {
    pub topping: MenuItemToppingUuid,
    pub quantity: u32,
}
