use clap::Args;
use eatsight_app::domain::menu::{
    data::NewMenuItemTopping,
    records::{MenuItemToppingUuid, MenuItemUuid},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::{
    ContextArgs,
    menu_item::{non_empty, non_negative},
};

#[derive(Debug, Args)]
pub(crate) struct AddToppingArgs {
    #[command(flatten)]
    context: ContextArgs,

    #[arg(long)]
    menu_item_uuid: Uuid,

    #[arg(long)]
    name: String,

    /// Price per unit
    #[arg(long)]
    price: Decimal,

    #[arg(long)]
    inactive: bool,
}

impl AddToppingArgs {
    fn new_topping(&self) -> Result<NewMenuItemTopping, String> {
        Ok(NewMenuItemTopping {
            uuid: MenuItemToppingUuid::new(),
            menu_item: MenuItemUuid::from_uuid(self.menu_item_uuid),
            name: non_empty("name", &self.name)?,
            price: non_negative("price", self.price)?,
            is_active: !self.inactive,
        })
    }
}

pub(crate) async fn run(args: AddToppingArgs) -> Result<(), String> {
    let topping = args.new_topping()?;

    let app = args.context.connect().await?;

    let created = app
        .menu
        .create_menu_item_topping(topping)
        .await
        .map_err(|error| format!("failed to add topping: {error}"))?;

    println!("topping_uuid: {}", created.uuid);

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
        args: AddToppingArgs,
    }

    fn parse(extra: &[&str]) -> Result<AddToppingArgs, clap::Error> {
        let base = ["menu-item-add-topping", "--database-url", "postgres://localhost/eatsight"];

        Command::try_parse_from(base.iter().chain(extra)).map(|command| command.args)
    }

    #[test]
    fn builds_topping() -> TestResult {
        let item = Uuid::now_v7().to_string();

        let topping = parse(&[
            "--menu-item-uuid",
            item.as_str(),
            "--name",
            "Fried Egg",
            "--price",
            "4000",
        ])?
        .new_topping()?;

        assert_eq!(topping.name, "Fried Egg");
        assert_eq!(topping.price, dec!(4000));
        assert!(topping.is_active, "toppings are active unless --inactive");

        Ok(())
    }

    #[test]
    fn price_is_required() {
        let item = Uuid::now_v7().to_string();

        assert!(
            parse(&["--menu-item-uuid", item.as_str(), "--name", "Fried Egg"]).is_err(),
            "--price is mandatory for toppings"
        );
    }
}
