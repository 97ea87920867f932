//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        menu::{records::RestaurantUuid, repository::PgMenuRepository},
        orders::repositories::PgOrdersRepository,
        reviews::{
            data::NewReview,
            errors::{ReviewValidationError, ReviewsServiceError},
            records::ReviewRecord,
            repository::PgReviewsRepository,
        },
        users::{records::UserUuid, repository::PgUsersRepository},
    },
};

/// Reward points credited for every review.
pub const REVIEW_POINTS: u64 = 500;

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    reviews: PgReviewsRepository,
    menu: PgMenuRepository,
    orders: PgOrdersRepository,
    users: PgUsersRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            reviews: PgReviewsRepository::new(),
            menu: PgMenuRepository::new(),
            orders: PgOrdersRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    #[tracing::instrument(
        name = "reviews.service.create_review",
        skip(self, review),
        fields(
            user_uuid = %user,
            restaurant_uuid = %review.restaurant,
            review_uuid = %review.uuid,
            rating = review.rating
        ),
        err
    )]
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        if !RATING_RANGE.contains(&review.rating) {
            return Err(ReviewValidationError::RatingOutOfRange(review.rating).into());
        }

        let mut tx = self.db.begin().await?;

        if !self.menu.restaurant_exists(&mut tx, review.restaurant).await? {
            return Err(ReviewsServiceError::NotFound);
        }

        if let Some(order) = review.order {
            let order = self.orders.lock_order(&mut tx, order, user).await?;

            if order.restaurant_uuid != review.restaurant {
                return Err(ReviewValidationError::OrderFromAnotherRestaurant.into());
            }

            if !self.orders.mark_reviewed(&mut tx, order.uuid).await? {
                debug!(order_uuid = %order.uuid, "order already reviewed");

                return Err(ReviewsServiceError::AlreadyReviewed);
            }
        }

        let created = self.reviews.create_review(&mut tx, user, &review).await?;

        let reviewer = self.users.add_points(&mut tx, user, REVIEW_POINTS).await?;

        tx.commit().await?;

        info!(
            points_awarded = REVIEW_POINTS,
            total_points = reviewer.total_points,
            "review created"
        );

        Ok(created)
    }

    async fn list_restaurant_reviews(
        &self,
        restaurant: RestaurantUuid,
        limit: u32,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.menu.restaurant_exists(&mut tx, restaurant).await? {
            return Err(ReviewsServiceError::NotFound);
        }

        let reviews = self
            .reviews
            .list_restaurant_reviews(&mut tx, restaurant, limit)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Review a restaurant, optionally against one of the user's orders.
    ///
    /// Each order can be reviewed once. The reviewer is credited [`REVIEW_POINTS`] in the
    /// same transaction.
    async fn create_review(
        &self,
        user: UserUuid,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Newest reviews of a restaurant.
    async fn list_restaurant_reviews(
        &self,
        restaurant: RestaurantUuid,
        limit: u32,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        domain::{
            orders::OrdersService, reviews::records::ReviewUuid, users::UsersService,
        },
        test::{
            TestContext,
            helpers::{create_restaurant, create_user, place_order},
        },
    };

    use super::*;

    fn review(restaurant: RestaurantUuid, rating: u8) -> NewReview {
        NewReview {
            uuid: ReviewUuid::new(),
            restaurant,
            rating,
            comments: Some("Great satay".to_string()),
            feedback_categories: vec!["food".to_string(), "service".to_string()],
            order: None,
        }
    }

    #[tokio::test]
    async fn review_awards_points() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 100).await?;
        let restaurant = create_restaurant(&ctx).await?;

        let created = ctx
            .reviews
            .create_review(user.uuid, review(restaurant.uuid, 5))
            .await?;

        assert_eq!(created.rating, 5);
        assert_eq!(created.feedback_categories, vec!["food", "service"]);
        assert_eq!(ctx.users.get_user(user.uuid).await?.total_points, 600);

        Ok(())
    }

    #[tokio::test]
    async fn rating_outside_range_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 0).await?;
        let restaurant = create_restaurant(&ctx).await?;

        for rating in [0, 6] {
            let result = ctx
                .reviews
                .create_review(user.uuid, review(restaurant.uuid, rating))
                .await;

            assert!(
                matches!(
                    result,
                    Err(ReviewsServiceError::Validation(
                        ReviewValidationError::RatingOutOfRange(r)
                    )) if r == rating
                ),
                "expected RatingOutOfRange, got {result:?}"
            );
        }

        assert_eq!(ctx.users.get_user(user.uuid).await?.total_points, 0);

        Ok(())
    }

    #[tokio::test]
    async fn order_can_only_be_reviewed_once() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 0).await?;
        let order = place_order(&ctx, user.uuid, dec!(30000)).await?;

        let with_order = || NewReview {
            order: Some(order.uuid),
            ..review(order.restaurant_uuid, 4)
        };

        ctx.reviews.create_review(user.uuid, with_order()).await?;

        let result = ctx.reviews.create_review(user.uuid, with_order()).await;

        assert!(
            matches!(result, Err(ReviewsServiceError::AlreadyReviewed)),
            "expected AlreadyReviewed, got {result:?}"
        );
        assert!(ctx.orders.get_order(user.uuid, order.uuid).await?.is_reviewed);
        assert_eq!(ctx.users.get_user(user.uuid).await?.total_points, REVIEW_POINTS);

        Ok(())
    }

    #[tokio::test]
    async fn someone_elses_order_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = create_user(&ctx, 0).await?;
        let stranger = create_user(&ctx, 0).await?;
        let order = place_order(&ctx, owner.uuid, dec!(30000)).await?;

        let result = ctx
            .reviews
            .create_review(
                stranger.uuid,
                NewReview {
                    order: Some(order.uuid),
                    ..review(order.restaurant_uuid, 3)
                },
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn order_from_another_restaurant_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 0).await?;
        let order = place_order(&ctx, user.uuid, dec!(30000)).await?;
        let elsewhere = create_restaurant(&ctx).await?;

        let result = ctx
            .reviews
            .create_review(
                user.uuid,
                NewReview {
                    order: Some(order.uuid),
                    ..review(elsewhere.uuid, 3)
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ReviewsServiceError::Validation(
                    ReviewValidationError::OrderFromAnotherRestaurant
                ))
            ),
            "expected OrderFromAnotherRestaurant, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn restaurant_reviews_are_newest_first_and_limited() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, 0).await?;
        let restaurant = create_restaurant(&ctx).await?;

        let mut created = Vec::new();

        for rating in 1..=3 {
            created.push(
                ctx.reviews
                    .create_review(user.uuid, review(restaurant.uuid, rating))
                    .await?
                    .uuid,
            );
        }

        let listed = ctx.reviews.list_restaurant_reviews(restaurant.uuid, 2).await?;

        assert_eq!(
            listed.iter().map(|r| r.uuid).collect::<Vec<_>>(),
            created.iter().rev().take(2).copied().collect::<Vec<_>>()
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_restaurant_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reviews
            .list_restaurant_reviews(RestaurantUuid::new(), 10)
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
