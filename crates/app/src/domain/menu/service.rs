//! Menu service.

use async_trait::async_trait;
use eatsight::pricing::{PricingError, storable_amount};
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::menu::{
        data::{NewMenuItem, NewMenuItemOption, NewMenuItemTopping, NewRestaurant, NewTable},
        errors::MenuServiceError,
        records::{
            MenuItemOptionRecord, MenuItemRecord, MenuItemToppingRecord, MenuItemUuid,
            RestaurantRecord, RestaurantUuid, TableRecord,
        },
        repository::PgMenuRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgMenuService {
    db: Db,
    repository: PgMenuRepository,
}

impl PgMenuService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMenuRepository::new(),
        }
    }
}

/// Menu prices must be non-negative and fit a monetary column.
fn check_prices(prices: impl IntoIterator<Item = Decimal>) -> Result<(), PricingError> {
    prices
        .into_iter()
        .try_for_each(|price| storable_amount(price).map(|_| ()))
}

#[async_trait]
impl MenuService for PgMenuService {
    #[tracing::instrument(
        name = "menu.service.create_restaurant",
        skip(self, restaurant),
        fields(restaurant_uuid = %restaurant.uuid),
        err
    )]
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_restaurant(&mut tx, &restaurant).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let restaurants = self.repository.list_restaurants(&mut tx).await?;

        tx.commit().await?;

        Ok(restaurants)
    }

    #[tracing::instrument(
        name = "menu.service.create_table",
        skip(self, table),
        fields(restaurant_uuid = %table.restaurant, table_uuid = %table.uuid),
        err
    )]
    async fn create_table(&self, table: NewTable) -> Result<TableRecord, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_table(&mut tx, &table).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "menu.service.create_menu_item",
        skip(self, item),
        fields(restaurant_uuid = %item.restaurant, menu_item_uuid = %item.uuid),
        err
    )]
    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItemRecord, MenuServiceError> {
        check_prices(std::iter::once(item.original_price).chain(item.discounted_price))?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_menu_item(&mut tx, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_menu_item_option(
        &self,
        option: NewMenuItemOption,
    ) -> Result<MenuItemOptionRecord, MenuServiceError> {
        check_prices([option.price])?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_menu_item_option(&mut tx, &option)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn create_menu_item_topping(
        &self,
        topping: NewMenuItemTopping,
    ) -> Result<MenuItemToppingRecord, MenuServiceError> {
        check_prices([topping.price])?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_menu_item_topping(&mut tx, &topping)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_menu_item(&self, item: MenuItemUuid) -> Result<MenuItemRecord, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_menu_item(&mut tx, item).await?;

        record.options = self.repository.list_menu_item_options(&mut tx, item).await?;
        record.toppings = self.repository.list_menu_item_toppings(&mut tx, item).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_menu_items(
        &self,
        restaurant: RestaurantUuid,
        include_inactive: bool,
    ) -> Result<Vec<MenuItemRecord>, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.restaurant_exists(&mut tx, restaurant).await? {
            return Err(MenuServiceError::NotFound);
        }

        let items = self
            .repository
            .list_menu_items(&mut tx, restaurant, include_inactive)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn list_tables(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<TableRecord>, MenuServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.restaurant_exists(&mut tx, restaurant).await? {
            return Err(MenuServiceError::NotFound);
        }

        let tables = self.repository.list_tables(&mut tx, restaurant).await?;

        tx.commit().await?;

        Ok(tables)
    }
}

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<RestaurantRecord, MenuServiceError>;

    /// Every restaurant ordered by name.
    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>, MenuServiceError>;

    async fn create_table(&self, table: NewTable) -> Result<TableRecord, MenuServiceError>;

    async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItemRecord, MenuServiceError>;

    async fn create_menu_item_option(
        &self,
        option: NewMenuItemOption,
    ) -> Result<MenuItemOptionRecord, MenuServiceError>;

    async fn create_menu_item_topping(
        &self,
        topping: NewMenuItemTopping,
    ) -> Result<MenuItemToppingRecord, MenuServiceError>;

    /// One menu item with its active options and toppings.
    async fn get_menu_item(&self, item: MenuItemUuid) -> Result<MenuItemRecord, MenuServiceError>;

    /// Menu items of a restaurant ordered by name. Inactive items are hidden unless asked for.
    async fn list_menu_items(
        &self,
        restaurant: RestaurantUuid,
        include_inactive: bool,
    ) -> Result<Vec<MenuItemRecord>, MenuServiceError>;

    /// Tables of a restaurant ordered by number.
    async fn list_tables(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<TableRecord>, MenuServiceError>;
}
