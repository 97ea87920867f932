use clap::Args;
use eatsight_app::domain::users::records::UserUuid;
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct AddPointsArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// User to credit
    #[arg(long)]
    user_uuid: Uuid,

    /// Points to add
    #[arg(long)]
    points: u64,
}

pub(crate) async fn run(args: AddPointsArgs) -> Result<(), String> {
    let app = args.context.connect().await?;

    let user = app
        .users
        .add_points(UserUuid::from_uuid(args.user_uuid), args.points)
        .await
        .map_err(|error| format!("failed to add points: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("total_points: {}", user.total_points);

    Ok(())
}
