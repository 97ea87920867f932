//! Authentication

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::{IssuedUserToken, UserTokenRecord, UserTokenUuid};
pub use service::*;
pub use token::*;
