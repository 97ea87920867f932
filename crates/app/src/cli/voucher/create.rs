use clap::Args;
use eatsight_app::domain::vouchers::{data::NewVoucher, records::VoucherUuid};
use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateVoucherArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Unique voucher code
    #[arg(long)]
    code: String,

    #[arg(long, default_value = "")]
    description: String,

    /// Points a user spends to redeem one copy
    #[arg(long)]
    points_cost: u64,

    /// Flat discount, or the cap of a percentage discount (0 for no cap)
    #[arg(long, default_value_t = Decimal::ZERO)]
    value: Decimal,

    /// Percentage of the subtotal to take off, e.g. `10`
    #[arg(long)]
    percentage: Option<Decimal>,

    /// Date from which the voucher can no longer be redeemed
    #[arg(long)]
    expiry_date: Option<Date>,

    /// Create the voucher switched off
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(args: CreateVoucherArgs) -> Result<(), String> {
    if args.code.trim().is_empty() {
        return Err("code cannot be empty".to_string());
    }

    let app = args.context.connect().await?;

    let voucher = app
        .vouchers
        .create_voucher(NewVoucher {
            uuid: VoucherUuid::new(),
            code: args.code,
            description: args.description,
            points_cost: args.points_cost,
            value: args.value,
            discount_percentage: args.percentage,
            expiry_date: args.expiry_date,
            is_active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create voucher: {error}"))?;

    println!("voucher_uuid: {}", voucher.uuid);
    println!("voucher_code: {}", voucher.code);
    println!("points_cost: {}", voucher.points_cost);

    Ok(())
}
