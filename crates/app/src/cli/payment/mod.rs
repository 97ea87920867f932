use clap::{Args, Subcommand};

mod verify;
mod watch;

#[derive(Debug, Args)]
pub(crate) struct PaymentCommand {
    #[command(subcommand)]
    command: PaymentSubcommand,
}

#[derive(Debug, Subcommand)]
enum PaymentSubcommand {
    Verify(verify::VerifyPaymentArgs),
    Watch(watch::WatchPaymentArgs),
}

pub(crate) async fn run(command: PaymentCommand) -> Result<(), String> {
    match command.command {
        PaymentSubcommand::Verify(args) => verify::run(args).await,
        PaymentSubcommand::Watch(args) => watch::run(args).await,
    }
}
