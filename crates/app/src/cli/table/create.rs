use clap::Args;
use eatsight_app::domain::menu::{
    data::NewTable,
    records::{RestaurantUuid, TableUuid},
};
use uuid::Uuid;

use crate::cli::ContextArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTableArgs {
    #[command(flatten)]
    context: ContextArgs,

    #[arg(long)]
    restaurant_uuid: Uuid,

    /// Label printed on the table, unique per restaurant
    #[arg(long)]
    number: String,

    /// Seats at the table
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=2_147_483_647))]
    capacity: Option<u32>,
}

impl CreateTableArgs {
    fn new_table(&self) -> Result<NewTable, String> {
        let number = self.number.trim();

        if number.is_empty() {
            return Err("table number cannot be empty".to_string());
        }

        Ok(NewTable {
            uuid: TableUuid::new(),
            restaurant: RestaurantUuid::from_uuid(self.restaurant_uuid),
            table_number: number.to_string(),
            capacity: self.capacity,
        })
    }
}

pub(crate) async fn run(args: CreateTableArgs) -> Result<(), String> {
    let table = args.new_table()?;

    let app = args.context.connect().await?;

    let created = app
        .menu
        .create_table(table)
        .await
        .map_err(|error| format!("failed to create table: {error}"))?;

    println!("table_uuid: {}", created.uuid);
    println!("table_number: {}", created.table_number);

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
        args: CreateTableArgs,
    }

    fn parse(extra: &[&str]) -> Result<CreateTableArgs, clap::Error> {
        let base = ["table-create", "--database-url", "postgres://localhost/eatsight"];

        Command::try_parse_from(base.iter().chain(extra)).map(|command| command.args)
    }

    #[test]
    fn builds_table_for_the_restaurant() -> TestResult {
        let restaurant = Uuid::now_v7();
        let restaurant_arg = restaurant.to_string();

        let args = parse(&[
            "--restaurant-uuid",
            restaurant_arg.as_str(),
            "--number",
            "A1",
            "--capacity",
            "4",
        ])?;

        let table = args.new_table()?;

        assert_eq!(table.restaurant.into_uuid(), restaurant);
        assert_eq!(table.table_number, "A1");
        assert_eq!(table.capacity, Some(4));

        Ok(())
    }

    #[test]
    fn zero_capacity_is_refused_at_parse_time() {
        let restaurant = Uuid::now_v7().to_string();

        let result = parse(&[
            "--restaurant-uuid",
            restaurant.as_str(),
            "--number",
            "A1",
            "--capacity",
            "0",
        ]);

        assert!(result.is_err(), "capacity must be at least 1");
    }

    #[test]
    fn malformed_restaurant_uuid_is_refused() {
        let result = parse(&["--restaurant-uuid", "not-a-uuid", "--number", "A1"]);

        assert!(result.is_err(), "restaurant uuid must parse");
    }
}
