//! Restaurant Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::menu::records::RestaurantRecord;

use crate::{extensions::*, menu::errors::into_status_error, state::State};

/// Restaurant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestaurantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub location: Option<String>,
}

impl From<RestaurantRecord> for RestaurantResponse {
    fn from(restaurant: RestaurantRecord) -> Self {
        Self {
            uuid: restaurant.uuid.into_uuid(),
            name: restaurant.name,
            location: restaurant.location,
        }
    }
}

/// Restaurant Index Handler
#[endpoint(
    tags("restaurants"),
    summary = "List Restaurants",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Restaurants by name"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<RestaurantResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let restaurants = state
        .app
        .menu
        .list_restaurants()
        .await
        .map_err(into_status_error)?;

    Ok(Json(restaurants.into_iter().map(Into::into).collect()))
}
