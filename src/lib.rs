//! Eatsight
//!
//! Lifecycle rules for restaurant orders, payments and point-funded vouchers:
//! status transitions, payment verification mapping, and exact-decimal pricing and
//! discount arithmetic. Persistence lives in `eatsight-app`.

pub mod discounts;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod vouchers;

pub mod prelude;
