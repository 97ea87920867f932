use clap::Args;
use eatsight_app::domain::users::{
    data::NewUser,
    records::UserUuid,
};
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    context: ContextArgs,

    /// Display name
    #[arg(long)]
    name: String,

    /// Phone number, unique across users
    #[arg(long)]
    phone_number: Option<String>,

    /// Opening points balance
    #[arg(long, default_value_t = 0)]
    points: u64,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let app = args.context.connect().await?;

    let user = app
        .users
        .create_user(NewUser {
            uuid: args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid),
            name: args.name,
            phone_number: args.phone_number,
            total_points: args.points,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_name: {}", user.name);
    println!("total_points: {}", user.total_points);

    Ok(())
}
