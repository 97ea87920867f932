use clap::{Args, Subcommand};

mod create;
mod list;
mod revoke;

/// Manage the bearer tokens customers use against the JSON API.
#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Issue a token for a user; the plaintext is printed once
    Create(create::CreateTokenArgs),

    /// List a user's tokens, newest first
    List(list::ListTokensArgs),

    /// Revoke one of a user's tokens
    Revoke(revoke::RevokeTokenArgs),
}

pub(crate) async fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Create(args) => create::run(args).await,
        TokenSubcommand::List(args) => list::run(args).await,
        TokenSubcommand::Revoke(args) => revoke::run(args).await,
    }
}
