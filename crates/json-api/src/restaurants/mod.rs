//! Restaurants

mod handlers;

pub(crate) use handlers::*;
