//! Restaurant Handlers

pub(crate) mod index;
pub(crate) mod tables;
