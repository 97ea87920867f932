//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    columns::{quantity_to_i32, try_get_quantity},
    menu::records::{MenuItemOptionUuid, MenuItemToppingUuid, MenuItemUuid},
    orders::records::{
        OrderItemOptionRecord, OrderItemOptionUuid, OrderItemRecord, OrderItemToppingRecord,
        OrderItemToppingUuid, OrderItemUuid, OrderUuid,
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const CREATE_ORDER_ITEM_OPTION_SQL: &str = include_str!("../sql/create_order_item_option.sql");
const CREATE_ORDER_ITEM_TOPPING_SQL: &str = include_str!("../sql/create_order_item_topping.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const LIST_ORDER_ITEM_OPTIONS_SQL: &str = include_str!("../sql/list_order_item_options.sql");
const LIST_ORDER_ITEM_TOPPINGS_SQL: &str = include_str!("../sql/list_order_item_toppings.sql");

/// A priced line ready to be stored.
#[derive(Debug, Clone)]
pub(crate) struct PricedOrderItem<'a> {
    pub uuid: OrderItemUuid,
    pub menu_item: MenuItemUuid,
    pub quantity: u32,
    pub price: Decimal,
    pub special_instructions: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        item: PricedOrderItem<'_>,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(item.menu_item.into_uuid())
            .bind(quantity_to_i32("quantity", item.quantity)?)
            .bind(item.price)
            .bind(item.special_instructions)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item_option(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        option: MenuItemOptionUuid,
        quantity: u32,
        price: Decimal,
    ) -> Result<OrderItemOptionRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemOptionRecord>(CREATE_ORDER_ITEM_OPTION_SQL)
            .bind(OrderItemOptionUuid::new().into_uuid())
            .bind(item.into_uuid())
            .bind(option.into_uuid())
            .bind(quantity_to_i32("quantity", quantity)?)
            .bind(price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item_topping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        topping: MenuItemToppingUuid,
        quantity: u32,
        price: Decimal,
    ) -> Result<OrderItemToppingRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemToppingRecord>(CREATE_ORDER_ITEM_TOPPING_SQL)
            .bind(OrderItemToppingUuid::new().into_uuid())
            .bind(item.into_uuid())
            .bind(topping.into_uuid())
            .bind(quantity_to_i32("quantity", quantity)?)
            .bind(price)
            .fetch_one(&mut **tx)
            .await
    }

    /// All line items of an order with their options and toppings attached.
    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let mut items = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let options = query_as::<Postgres, OrderItemOptionRecord>(LIST_ORDER_ITEM_OPTIONS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let toppings = query_as::<Postgres, OrderItemToppingRecord>(LIST_ORDER_ITEM_TOPPINGS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        for option in options {
            if let Some(item) = items.iter_mut().find(|item| item.uuid == option.order_item_uuid) {
                item.options.push(option);
            }
        }

        for topping in toppings {
            if let Some(item) = items.iter_mut().find(|item| item.uuid == topping.order_item_uuid) {
                item.toppings.push(topping);
            }
        }

        Ok(items)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: row.try_get("price")?,
            special_instructions: row.try_get("special_instructions")?,
            options: Vec::new(),
            toppings: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemOptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemOptionUuid::from_uuid(row.try_get("uuid")?),
            order_item_uuid: OrderItemUuid::from_uuid(row.try_get("order_item_uuid")?),
            option_uuid: MenuItemOptionUuid::from_uuid(row.try_get("option_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemToppingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemToppingUuid::from_uuid(row.try_get("uuid")?),
            order_item_uuid: OrderItemUuid::from_uuid(row.try_get("order_item_uuid")?),
            topping_uuid: MenuItemToppingUuid::from_uuid(row.try_get("topping_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
