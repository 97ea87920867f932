//! Eatsight Domain Concerns

pub(crate) mod columns;

pub mod menu;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod users;
pub mod vouchers;
