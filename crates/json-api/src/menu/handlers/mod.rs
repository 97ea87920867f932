//! Menu Handlers

pub(crate) mod get;
pub(crate) mod index;

#[cfg(test)]
mod tests {
    use eatsight_app::domain::menu::records::{MenuItemRecord, MenuItemUuid, RestaurantUuid};
    use jiff::Timestamp;
    use rust_decimal_macros::dec;

    /// An active 35000 item discounted to 30000, with no extras loaded.
    pub(crate) fn make_menu_item(uuid: MenuItemUuid, restaurant: RestaurantUuid) -> MenuItemRecord {
        MenuItemRecord {
            uuid,
            restaurant_uuid: restaurant,
            name: "Nasi Goreng".to_string(),
            original_price: dec!(35000),
            discounted_price: Some(dec!(30000)),
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            options: Vec::new(),
            toppings: Vec::new(),
        }
    }
}
