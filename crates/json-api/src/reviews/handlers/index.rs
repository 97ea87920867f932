//! Review Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::{menu::records::RestaurantUuid, reviews::records::ReviewRecord};

use crate::{extensions::*, reviews::errors::into_status_error, state::State};

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

/// Review Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub restaurant_uuid: Uuid,
    pub order_uuid: Option<Uuid>,

    /// 1 to 5 stars
    pub rating: u8,

    pub comments: Option<String>,
    pub feedback_categories: Vec<String>,
    pub created_at: String,
}

impl From<ReviewRecord> for ReviewResponse {
    fn from(review: ReviewRecord) -> Self {
        Self {
            uuid: review.uuid.into_uuid(),
            restaurant_uuid: review.restaurant_uuid.into_uuid(),
            order_uuid: review.order_uuid.map(|uuid| uuid.into_uuid()),
            rating: review.rating,
            comments: review.comments,
            feedback_categories: review.feedback_categories,
            created_at: review.created_at.to_string(),
        }
    }
}

/// Review Index Handler
///
/// A restaurant's most recent reviews. `limit` defaults to 20 and is capped at 100.
#[endpoint(
    tags("reviews"),
    summary = "List Restaurant Reviews",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Reviews, newest first"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant not found"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ReviewResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = limit.into_inner().unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

    let reviews = state
        .app
        .reviews
        .list_restaurant_reviews(RestaurantUuid::from_uuid(restaurant.into_inner()), limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}
