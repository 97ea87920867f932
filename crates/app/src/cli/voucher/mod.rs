use clap::{Args, Subcommand};

mod create;

#[derive(Debug, Args)]
pub(crate) struct VoucherCommand {
    #[command(subcommand)]
    command: VoucherSubcommand,
}

#[derive(Debug, Subcommand)]
enum VoucherSubcommand {
    Create(create::CreateVoucherArgs),
}

pub(crate) async fn run(command: VoucherCommand) -> Result<(), String> {
    match command.command {
        VoucherSubcommand::Create(args) => create::run(args).await,
    }
}
