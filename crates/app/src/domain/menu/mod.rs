//! Restaurants, tables and the menu items orders are priced from

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::MenuServiceError;
pub use service::*;
