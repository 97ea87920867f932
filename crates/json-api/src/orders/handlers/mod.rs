//! Order Handlers

pub(crate) mod apply_voucher;
pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
