//! Persistence, services and command-line tooling for the eatsight ordering flow.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
