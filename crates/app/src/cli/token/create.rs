use clap::Args;
use jiff::Timestamp;
use eatsight_app::domain::users::records::UserUuid;
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// User that should own the token
    #[arg(long)]
    user_uuid: Uuid,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<Timestamp>,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let app = args.context.connect().await?;

    let issued = app
        .auth
        .issue_token(UserUuid::from_uuid(args.user_uuid), args.expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.record.uuid);
    println!("user_uuid: {}", issued.record.user_uuid);
    println!("token_created_at: {}", issued.record.created_at);
    if let Some(expires_at) = issued.record.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("bearer_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
