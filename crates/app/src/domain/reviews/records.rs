//! Review Records

use jiff::Timestamp;

use crate::{
    domain::{
        menu::records::RestaurantUuid, orders::records::OrderUuid, users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub order_uuid: Option<OrderUuid>,
    pub rating: u8,
    pub comments: Option<String>,
    pub feedback_categories: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
