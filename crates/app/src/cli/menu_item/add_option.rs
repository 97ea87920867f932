use clap::Args;
use eatsight_app::domain::menu::{
    data::NewMenuItemOption,
    records::{MenuItemOptionUuid, MenuItemUuid},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::cli::{
    ContextArgs,
    menu_item::{non_empty, non_negative},
};

#[derive(Debug, Args)]
pub(crate) struct AddOptionArgs {
    #[command(flatten)]
    context: ContextArgs,

    #[arg(long)]
    menu_item_uuid: Uuid,

    #[arg(long)]
    name: String,

    /// Grouping label such as "Size"
    #[arg(long)]
    group: Option<String>,

    /// Surcharge per unit
    #[arg(long, default_value_t = Decimal::ZERO)]
    price: Decimal,

    #[arg(long)]
    inactive: bool,
}

impl AddOptionArgs {
    fn new_option(&self) -> Result<NewMenuItemOption, String> {
        Ok(NewMenuItemOption {
            uuid: MenuItemOptionUuid::new(),
            menu_item: MenuItemUuid::from_uuid(self.menu_item_uuid),
            option_group: self.group.clone(),
            name: non_empty("name", &self.name)?,
            price: non_negative("price", self.price)?,
            is_active: !self.inactive,
        })
    }
}

pub(crate) async fn run(args: AddOptionArgs) -> Result<(), String> {
    let option = args.new_option()?;

    let app = args.context.connect().await?;

    let created = app
        .menu
        .create_menu_item_option(option)
        .await
        .map_err(|error| format!("failed to add option: {error}"))?;

    println!("option_uuid: {}", created.uuid);

    Ok(())
}
