//! Orders

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::{OrderValidationError, OrdersServiceError};
pub use service::*;
