//! Restaurant Tables Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::menu::records::{RestaurantUuid, TableRecord};

use crate::{extensions::*, menu::errors::into_status_error, state::State};

/// Table Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TableResponse {
    pub uuid: Uuid,
    pub table_number: String,
    pub capacity: Option<u32>,
}

impl From<TableRecord> for TableResponse {
    fn from(table: TableRecord) -> Self {
        Self {
            uuid: table.uuid.into_uuid(),
            table_number: table.table_number,
            capacity: table.capacity,
        }
    }
}

/// Restaurant Tables Handler
///
/// Tables a dine-in order or cash payment can name.
#[endpoint(
    tags("restaurants"),
    summary = "List Restaurant Tables",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tables by number"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Vec<TableResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tables = state
        .app
        .menu
        .list_tables(RestaurantUuid::from_uuid(restaurant.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(tables.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eatsight_app::{
        context::AppContext,
        domain::menu::{MenuServiceError, MockMenuService, records::TableUuid},
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{app_context, authenticated_service};

    use super::*;

    fn make_service(menu: MockMenuService) -> Service {
        authenticated_service(
            AppContext {
                menu: Arc::new(menu),
                ..app_context()
            },
            Router::with_path("restaurants/{restaurant}/tables").get(handler),
        )
    }

    #[tokio::test]
    async fn lists_tables_of_the_restaurant() -> TestResult {
        let restaurant = RestaurantUuid::new();
        let table = TableUuid::new();

        let mut menu = MockMenuService::new();

        menu.expect_list_tables()
            .once()
            .withf(move |r| *r == restaurant)
            .return_once(move |_| {
                Ok(vec![TableRecord {
                    uuid: table,
                    restaurant_uuid: restaurant,
                    table_number: "A1".to_string(),
                    capacity: Some(4),
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                }])
            });

        let mut res = TestClient::get(format!("http://example.com/restaurants/{restaurant}/tables"))
            .send(&make_service(menu))
            .await;

        let body: Vec<TableResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            body.first()
                .is_some_and(|t| t.uuid == table.into_uuid() && t.table_number == "A1"),
            "unexpected body {body:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_restaurant_returns_404() {
        let mut menu = MockMenuService::new();

        menu.expect_list_tables()
            .once()
            .return_once(|_| Err(MenuServiceError::NotFound));

        let res = TestClient::get(format!(
            "http://example.com/restaurants/{}/tables",
            Uuid::now_v7()
        ))
        .send(&make_service(menu))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
