use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eatsight_app::{
    context::AppContext,
    domain::payments::qr::PaymentsConfig,
};

mod db;
mod menu_item;
mod payment;
mod restaurant;
mod table;
mod token;
mod user;
mod voucher;

#[derive(Debug, Parser)]
#[command(name = "eatsight-app", about = "Eatsight operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(user::UserCommand),
    Token(token::TokenCommand),
    Restaurant(restaurant::RestaurantCommand),
    Table(table::TableCommand),
    MenuItem(menu_item::MenuItemCommand),
    Voucher(voucher::VoucherCommand),
    Payment(payment::PaymentCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::User(command) => user::run(command).await,
            Commands::Token(command) => token::run(command).await,
            Commands::Restaurant(command) => restaurant::run(command).await,
            Commands::Table(command) => table::run(command).await,
            Commands::MenuItem(command) => menu_item::run(command).await,
            Commands::Voucher(command) => voucher::run(command).await,
            Commands::Payment(command) => payment::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

/// Connection and payment settings shared by every subcommand.
#[derive(Debug, Args)]
pub(crate) struct ContextArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Prefix of the payment URI encoded into QR codes
    #[arg(long, env = "PAYMENT_BASE_URL", default_value = "https://eatsight.com")]
    payment_base_url: String,

    /// Directory QR images are written below
    #[arg(long, env = "MEDIA_ROOT", default_value = "media")]
    media_root: PathBuf,
}

impl ContextArgs {
    pub(crate) async fn connect(self) -> Result<AppContext, String> {
        AppContext::from_database_url(
            &self.database_url,
            PaymentsConfig {
                base_url: self.payment_base_url,
                media_root: self.media_root,
            },
        )
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
