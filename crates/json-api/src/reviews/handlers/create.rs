//! Create Review Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eatsight_app::domain::{
    menu::records::RestaurantUuid,
    orders::records::OrderUuid,
    reviews::{data::NewReview, records::ReviewUuid},
};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, index::ReviewResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    pub uuid: Uuid,

    /// 1 to 5 stars
    pub rating: u8,

    pub comments: Option<String>,

    #[serde(default)]
    pub feedback_categories: Vec<String>,

    /// One of the caller's orders from this restaurant
    pub order_uuid: Option<Uuid>,
}

/// Create Review Handler
///
/// Reviews a restaurant, optionally for a specific order, and credits the caller
/// with reward points.
#[endpoint(
    tags("reviews"),
    summary = "Create Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::NOT_FOUND, description = "Restaurant or order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already reviewed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Review failed validation"),
    ),
)]
pub(crate) async fn handler(
    restaurant: PathParam<Uuid>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let request = json.into_inner();

    let review = state
        .app
        .reviews
        .create_review(
            user,
            NewReview {
                uuid: ReviewUuid::from_uuid(request.uuid),
                restaurant: RestaurantUuid::from_uuid(restaurant.into_inner()),
                rating: request.rating,
                comments: request.comments,
                feedback_categories: request.feedback_categories,
                order: request.order_uuid.map(OrderUuid::from_uuid),
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}
