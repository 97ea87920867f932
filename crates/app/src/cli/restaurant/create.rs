use clap::Args;
use eatsight_app::domain::menu::{data::NewRestaurant, records::RestaurantUuid};

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateRestaurantArgs {
    #[command(flatten)]
    context: ContextArgs,

    #[arg(long)]
    name: String,

    /// Free-form address shown to customers
    #[arg(long)]
    location: Option<String>,
}

impl CreateRestaurantArgs {
    fn new_restaurant(&self) -> Result<NewRestaurant, String> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err("name cannot be empty".to_string());
        }

        Ok(NewRestaurant {
            uuid: RestaurantUuid::new(),
            name: name.to_string(),
            location: self.location.clone(),
        })
    }
}

pub(crate) async fn run(args: CreateRestaurantArgs) -> Result<(), String> {
    let restaurant = args.new_restaurant()?;

    let app = args.context.connect().await?;

    let created = app
        .menu
        .create_restaurant(restaurant)
        .await
        .map_err(|error| format!("failed to create restaurant: {error}"))?;

    println!("restaurant_uuid: {}", created.uuid);
    println!("restaurant_name: {}", created.name);

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Command {
        #[command(flatten)]
        args: CreateRestaurantArgs,
    }

    fn parse(extra: &[&str]) -> Result<CreateRestaurantArgs, clap::Error> {
        let base = ["restaurant-create", "--database-url", "postgres://localhost/eatsight"];

        Command::try_parse_from(base.iter().chain(extra)).map(|command| command.args)
    }

    #[test]
    fn builds_restaurant_from_flags() -> TestResult {
        let args = parse(&["--name", " Warung Sate ", "--location", "Jakarta"])?;

        let restaurant = args.new_restaurant()?;

        assert_eq!(restaurant.name, "Warung Sate");
        assert_eq!(restaurant.location.as_deref(), Some("Jakarta"));

        Ok(())
    }

    #[test]
    fn blank_name_is_rejected() -> TestResult {
        let args = parse(&["--name", "  "])?;

        assert!(args.new_restaurant().is_err(), "blank names must be refused");

        Ok(())
    }

    #[test]
    fn name_is_required() {
        assert!(parse(&[]).is_err(), "--name is mandatory");
    }
}
