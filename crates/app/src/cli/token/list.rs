use clap::Args;
use eatsight_app::domain::users::records::UserUuid;
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// User whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let app = args.context.connect().await?;

    let tokens = app
        .auth
        .list_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for user {}", args.user_uuid);
        return Ok(());
    }

    let or = |value: Option<jiff::Timestamp>, fallback: &str| {
        value.map_or_else(|| fallback.to_string(), |value| value.to_string())
    };

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("created_at: {}", token.created_at);
        println!("last_used_at: {}", or(token.last_used_at, "never"));
        println!("expires_at: {}", or(token.expires_at, "none"));
        println!("revoked_at: {}", or(token.revoked_at, "active"));
        println!();
    }

    Ok(())
}
