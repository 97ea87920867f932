//! Menu Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::menu::{
    data::{NewMenuItem, NewMenuItemOption, NewMenuItemTopping, NewRestaurant, NewTable},
    records::{
        MenuItemOptionRecord, MenuItemOptionUuid, MenuItemRecord, MenuItemToppingRecord,
        MenuItemToppingUuid, MenuItemUuid, RestaurantRecord, RestaurantUuid, TableRecord,
        TableUuid,
    },
};

const CREATE_RESTAURANT_SQL: &str = include_str!("sql/create_restaurant.sql");
const LIST_RESTAURANTS_SQL: &str = include_str!("sql/list_restaurants.sql");
const RESTAURANT_EXISTS_SQL: &str = include_str!("sql/restaurant_exists.sql");
const CREATE_TABLE_SQL: &str = include_str!("sql/create_table.sql");
const LIST_TABLES_SQL: &str = include_str!("sql/list_tables.sql");
const TABLE_BELONGS_TO_RESTAURANT_SQL: &str = include_str!("sql/table_belongs_to_restaurant.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const CREATE_MENU_ITEM_OPTION_SQL: &str = include_str!("sql/create_menu_item_option.sql");
const CREATE_MENU_ITEM_TOPPING_SQL: &str = include_str!("sql/create_menu_item_topping.sql");
const LIST_MENU_ITEM_OPTIONS_SQL: &str = include_str!("sql/list_menu_item_options.sql");
const LIST_MENU_ITEM_TOPPINGS_SQL: &str = include_str!("sql/list_menu_item_toppings.sql");
const FIND_ORDERABLE_ITEM_PRICE_SQL: &str = include_str!("sql/find_orderable_item_price.sql");
const FIND_ORDERABLE_OPTION_PRICE_SQL: &str = include_str!("sql/find_orderable_option_price.sql");
const FIND_ORDERABLE_TOPPING_PRICE_SQL: &str =
    include_str!("sql/find_orderable_topping_price.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMenuRepository;

impl PgMenuRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_restaurant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: &NewRestaurant,
    ) -> Result<RestaurantRecord, sqlx::Error> {
        query_as::<Postgres, RestaurantRecord>(CREATE_RESTAURANT_SQL)
            .bind(restaurant.uuid.into_uuid())
            .bind(&restaurant.name)
            .bind(restaurant.location.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<RestaurantRecord>, sqlx::Error> {
        query_as::<Postgres, RestaurantRecord>(LIST_RESTAURANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn restaurant_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(RESTAURANT_EXISTS_SQL)
            .bind(restaurant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_table(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        table: &NewTable,
    ) -> Result<TableRecord, sqlx::Error> {
        let capacity = table
            .capacity
            .map(i32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        query_as::<Postgres, TableRecord>(CREATE_TABLE_SQL)
            .bind(table.uuid.into_uuid())
            .bind(table.restaurant.into_uuid())
            .bind(&table.table_number)
            .bind(capacity)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_tables(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<TableRecord>, sqlx::Error> {
        query_as::<Postgres, TableRecord>(LIST_TABLES_SQL)
            .bind(restaurant.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn table_belongs_to_restaurant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        table: TableUuid,
        restaurant: RestaurantUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(TABLE_BELONGS_TO_RESTAURANT_SQL)
            .bind(table.into_uuid())
            .bind(restaurant.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewMenuItem,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(CREATE_MENU_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.restaurant.into_uuid())
            .bind(&item.name)
            .bind(item.original_price)
            .bind(item.discounted_price)
            .bind(item.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(GET_MENU_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
        include_inactive: bool,
    ) -> Result<Vec<MenuItemRecord>, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(LIST_MENU_ITEMS_SQL)
            .bind(restaurant.into_uuid())
            .bind(include_inactive)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item_option(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        option: &NewMenuItemOption,
    ) -> Result<MenuItemOptionRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemOptionRecord>(CREATE_MENU_ITEM_OPTION_SQL)
            .bind(option.uuid.into_uuid())
            .bind(option.menu_item.into_uuid())
            .bind(option.option_group.as_deref())
            .bind(&option.name)
            .bind(option.price)
            .bind(option.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item_topping(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        topping: &NewMenuItemTopping,
    ) -> Result<MenuItemToppingRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemToppingRecord>(CREATE_MENU_ITEM_TOPPING_SQL)
            .bind(topping.uuid.into_uuid())
            .bind(topping.menu_item.into_uuid())
            .bind(&topping.name)
            .bind(topping.price)
            .bind(topping.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_item_options(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<Vec<MenuItemOptionRecord>, sqlx::Error> {
        query_as::<Postgres, MenuItemOptionRecord>(LIST_MENU_ITEM_OPTIONS_SQL)
            .bind(item.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_menu_item_toppings(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
    ) -> Result<Vec<MenuItemToppingRecord>, sqlx::Error> {
        query_as::<Postgres, MenuItemToppingRecord>(LIST_MENU_ITEM_TOPPINGS_SQL)
            .bind(item.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Current unit price of an active item on the given restaurant's menu.
    pub(crate) async fn find_orderable_item_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
        item: MenuItemUuid,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(FIND_ORDERABLE_ITEM_PRICE_SQL)
            .bind(item.into_uuid())
            .bind(restaurant.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_orderable_option_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
        option: MenuItemOptionUuid,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(FIND_ORDERABLE_OPTION_PRICE_SQL)
            .bind(option.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_orderable_topping_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: MenuItemUuid,
        topping: MenuItemToppingUuid,
    ) -> Result<Option<Decimal>, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(FIND_ORDERABLE_TOPPING_PRICE_SQL)
            .bind(topping.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for RestaurantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RestaurantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TableRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let capacity = row
            .try_get::<Option<i32>, _>("capacity")?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "capacity".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: TableUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            table_number: row.try_get("table_number")?,
            capacity,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            name: row.try_get("name")?,
            original_price: row.try_get("original_price")?,
            discounted_price: row.try_get("discounted_price")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            options: Vec::new(),
            toppings: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItemOptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemOptionUuid::from_uuid(row.try_get("uuid")?),
            menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            option_group: row.try_get("option_group")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItemToppingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemToppingUuid::from_uuid(row.try_get("uuid")?),
            menu_item_uuid: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
