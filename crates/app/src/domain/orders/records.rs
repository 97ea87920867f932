//! Order Records

use eatsight::orders::{OrderMode, OrderStatus};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{
        menu::records::{
            MenuItemOptionUuid, MenuItemToppingUuid, MenuItemUuid, RestaurantUuid, TableUuid,
        },
        payments::records::PaymentMethodUuid,
        users::records::UserUuid,
        vouchers::records::OrderVoucherRecord,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItemRecord>;

/// Order Item Option UUID
pub type OrderItemOptionUuid = TypedUuid<OrderItemOptionRecord>;

/// Order Item Topping UUID
pub type OrderItemToppingUuid = TypedUuid<OrderItemToppingRecord>;

/// Order Record
///
/// `total_amount` always equals `subtotal + order_fee - discount_amount`.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub status: OrderStatus,
    pub order_mode: OrderMode,
    pub table_uuid: Option<TableUuid>,
    pub subtotal: Decimal,
    pub order_fee: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_method_uuid: Option<PaymentMethodUuid>,
    pub is_reviewed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Line items; empty in list results.
    pub items: Vec<OrderItemRecord>,

    /// Applied vouchers; empty in list results.
    pub vouchers: Vec<OrderVoucherRecord>,
}

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub quantity: u32,

    /// Unit price at the time the order was placed.
    pub price: Decimal,

    pub special_instructions: Option<String>,
    pub options: Vec<OrderItemOptionRecord>,
    pub toppings: Vec<OrderItemToppingRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Option Record
#[derive(Debug, Clone)]
pub struct OrderItemOptionRecord {
    pub uuid: OrderItemOptionUuid,
    pub order_item_uuid: OrderItemUuid,
    pub option_uuid: MenuItemOptionUuid,
    pub quantity: u32,
    pub price: Decimal,
    pub created_at: Timestamp,
}

/// Order Item Topping Record
#[derive(Debug, Clone)]
pub struct OrderItemToppingRecord {
    pub uuid: OrderItemToppingUuid,
    pub order_item_uuid: OrderItemUuid,
    pub topping_uuid: MenuItemToppingUuid,
    pub quantity: u32,
    pub price: Decimal,
    pub created_at: Timestamp,
}
