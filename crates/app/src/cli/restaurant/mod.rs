use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct RestaurantCommand {
    #[command(subcommand)]
    command: RestaurantSubcommand,
}

#[derive(Debug, Subcommand)]
enum RestaurantSubcommand {
    Create(create::CreateRestaurantArgs),
}

pub(crate) async fn run(command: RestaurantCommand) -> Result<(), String> {
    match command.command {
        RestaurantSubcommand::Create(args) => create::run(args).await,
    }
}
