use clap::Args;
use eatsight::payments::PaymentOutcome;
use eatsight_app::domain::payments::{data::PaymentVerification, records::PaymentUuid};
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct VerifyPaymentArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Payment to settle
    #[arg(long)]
    payment_uuid: Uuid,

    /// `completed` or `failed`
    #[arg(long)]
    outcome: PaymentOutcome,

    /// Note stored on the verification and shown to the payer
    #[arg(long)]
    message: Option<String>,

    /// Cashier confirming a cash payment
    #[arg(long)]
    cashier_name: Option<String>,
}

pub(crate) async fn run(args: VerifyPaymentArgs) -> Result<(), String> {
    let app = args.context.connect().await?;

    let result = app
        .payments
        .verify_payment(
            PaymentUuid::from_uuid(args.payment_uuid),
            PaymentVerification {
                outcome: args.outcome,
                message: args.message,
                cashier_name: args.cashier_name,
            },
        )
        .await
        .map_err(|error| format!("failed to verify payment: {error}"))?;

    println!("payment_uuid: {}", result.payment.uuid);
    println!("payment_status: {}", result.payment.status);

    if let Some(transaction_id) = &result.payment.transaction_id {
        println!("transaction_id: {transaction_id}");
    }

    if !result.applied {
        println!("payment was already settled; nothing changed");
    }

    Ok(())
}
