//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::domain::{
    menu::records::RestaurantUuid,
    orders::records::OrderUuid,
    reviews::{
        data::NewReview,
        records::{ReviewRecord, ReviewUuid},
    },
    users::records::UserUuid,
};

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const LIST_RESTAURANT_REVIEWS_SQL: &str = include_str!("sql/list_restaurant_reviews.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        review: &NewReview,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(user.into_uuid())
            .bind(review.restaurant.into_uuid())
            .bind(review.order.map(OrderUuid::into_uuid))
            .bind(i16::from(review.rating))
            .bind(review.comments.as_deref())
            .bind(&review.feedback_categories)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurant_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
        limit: u32,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_RESTAURANT_REVIEWS_SQL)
            .bind(restaurant.into_uuid())
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            order_uuid: row
                .try_get::<Option<Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            rating: u8::try_from(rating).map_err(|e| sqlx::Error::ColumnDecode {
                index: "rating".to_string(),
                source: Box::new(e),
            })?,
            comments: row.try_get("comments")?,
            feedback_categories: row.try_get("feedback_categories")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
