//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{PgOrderItemsRepository, PricedOrderItem};
pub(crate) use orders::PgOrdersRepository;
