//! Reviews Data

use crate::domain::{
    menu::records::RestaurantUuid, orders::records::OrderUuid, reviews::records::ReviewUuid,
};

/// New Review Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub restaurant: RestaurantUuid,

    /// Star rating, `1..=5`.
    pub rating: u8,

    pub comments: Option<String>,
    pub feedback_categories: Vec<String>,

    /// Order being reviewed; it must be the reviewer's and from the same restaurant.
    pub order: Option<OrderUuid>,
}
