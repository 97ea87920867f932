use std::time::Duration;

use clap::Args;
use eatsight_app::domain::{
    payments::{
        records::PaymentUuid,
        watch::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, WatchOptions, watch_payment_status},
    },
    users::records::UserUuid,
};
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct WatchPaymentArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Owner of the payment
    #[arg(long)]
    user_uuid: Uuid,

    /// Payment to follow
    #[arg(long)]
    payment_uuid: Uuid,

    /// Seconds between status checks
    #[arg(long, env = "PAYMENT_STATUS_INTERVAL_SECONDS", default_value_t = DEFAULT_INTERVAL.as_secs())]
    interval_seconds: u64,

    /// Seconds before giving up
    #[arg(long, env = "PAYMENT_STATUS_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    timeout_seconds: u64,
}

pub(crate) async fn run(args: WatchPaymentArgs) -> Result<(), String> {
    let app = args.context.connect().await?;

    let mut updates = watch_payment_status(
        app.payments,
        UserUuid::from_uuid(args.user_uuid),
        PaymentUuid::from_uuid(args.payment_uuid),
        WatchOptions {
            interval: Duration::from_secs(args.interval_seconds),
            timeout: Duration::from_secs(args.timeout_seconds),
        },
    );

    while let Some(update) = updates.recv().await {
        let update = update.map_err(|error| format!("failed to check payment: {error}"))?;

        println!(
            "{} status={} verification={} message={}",
            update.checked_at,
            update.status,
            update
                .verification_status
                .map_or_else(|| "none".to_string(), |status| status.to_string()),
            update.message.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
