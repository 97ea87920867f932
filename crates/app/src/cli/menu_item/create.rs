use clap::Args;
use eatsight_app::domain::menu::{
    data::NewMenuItem,
    records::{MenuItemUuid, RestaurantUuid},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::{
    ContextArgs,
    menu_item::{non_empty, non_negative},
};

#[derive(Debug, Args)]
pub(crate) struct CreateMenuItemArgs {
    #[command(flatten)]
    context: ContextArgs,

    #[arg(long)]
    restaurant_uuid: Uuid,

    #[arg(long)]
    name: String,

    /// List price in rupiah
    #[arg(long)]
    price: Decimal,

    /// Price charged instead of the list price while set
    #[arg(long)]
    discounted_price: Option<Decimal>,

    /// Create the item hidden from the menu
    #[arg(long)]
    inactive: bool,
}

impl CreateMenuItemArgs {
    fn new_menu_item(&self) -> Result<NewMenuItem, String> {
        Ok(NewMenuItem {
            uuid: MenuItemUuid::new(),
            restaurant: RestaurantUuid::from_uuid(self.restaurant_uuid),
            name: non_empty("name", &self.name)?,
            original_price: non_negative("price", self.price)?,
            discounted_price: self
                .discounted_price
                .map(|price| non_negative("discounted price", price))
                .transpose()?,
            is_active: !self.inactive,
        })
    }
}

pub(crate) async fn run(args: CreateMenuItemArgs) -> Result<(), String> {
    let item = args.new_menu_item()?;

    let app = args.context.connect().await?;

    let created = app
        .menu
        .create_menu_item(item)
        .await
        .map_err(|error| format!("failed to create menu item: {error}"))?;

    println!("menu_item_uuid: {}", created.uuid);
    println!("price: {}", created.effective_price());

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Command {
        #[command(flatten)]
        args: CreateMenuItemArgs,
    }

    fn parse(extra: &[&str]) -> Result<CreateMenuItemArgs, clap::Error> {
        let base = ["menu-item-create", "--database-url", "postgres://localhost/eatsight"];

        Command::try_parse_from(base.iter().chain(extra)).map(|command| command.args)
    }

    #[test]
    fn builds_active_item_with_discount() -> TestResult {
        let restaurant = Uuid::now_v7().to_string();

        let args = parse(&[
            "--restaurant-uuid",
            restaurant.as_str(),
            "--name",
            "Nasi Goreng",
            "--price",
            "35000",
            "--discounted-price",
            "30000",
        ])?;

        let item = args.new_menu_item()?;

        assert_eq!(item.original_price, dec!(35000));
        assert_eq!(item.discounted_price, Some(dec!(30000)));
        assert!(item.is_active, "items are active unless --inactive");

        Ok(())
    }

    #[test]
    fn inactive_flag_hides_the_item() -> TestResult {
        let restaurant = Uuid::now_v7().to_string();

        let args = parse(&[
            "--restaurant-uuid",
            restaurant.as_str(),
            "--name",
            "Seasonal Special",
            "--price",
            "50000",
            "--inactive",
        ])?;

        assert!(!args.new_menu_item()?.is_active, "--inactive should switch the item off");

        Ok(())
    }

    #[test]
    fn negative_price_is_refused() -> TestResult {
        let restaurant = Uuid::now_v7().to_string();

        let args = parse(&[
            "--restaurant-uuid",
            restaurant.as_str(),
            "--name",
            "Broken",
            "--price=-1",
        ])?;

        assert!(args.new_menu_item().is_err(), "negative prices must be refused");

        Ok(())
    }
}
