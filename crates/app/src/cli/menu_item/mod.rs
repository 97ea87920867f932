use clap::{Args, Subcommand};
use rust_decimal::Decimal;

mod add_option;
mod add_topping;
mod create;

#[derive(Debug, Args)]
pub(crate) struct MenuItemCommand {
    #[command(subcommand)]
    command: MenuItemSubcommand,
}

#[derive(Debug, Subcommand)]
enum MenuItemSubcommand {
    Create(create::CreateMenuItemArgs),
    AddOption(add_option::AddOptionArgs),
    AddTopping(add_topping::AddToppingArgs),
}

pub(crate) async fn run(command: MenuItemCommand) -> Result<(), String> {
    match command.command {
        MenuItemSubcommand::Create(args) => create::run(args).await,
        MenuItemSubcommand::AddOption(args) => add_option::run(args).await,
        MenuItemSubcommand::AddTopping(args) => add_topping::run(args).await,
    }
}

fn non_empty(field: &str, value: &str) -> Result<String, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    Ok(trimmed.to_string())
}

fn non_negative(field: &str, price: Decimal) -> Result<Decimal, String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(format!("{field} cannot be negative"));
    }

    Ok(price)
}
