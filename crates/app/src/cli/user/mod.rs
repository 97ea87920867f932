use clap::{Args, Subcommand};

mod add_points;
mod create;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(create::CreateUserArgs),
    AddPoints(add_points::AddPointsArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::AddPoints(args) => add_points::run(args).await,
    }
}
