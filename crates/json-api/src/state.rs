//! State

use std::sync::Arc;

use eatsight_app::{context::AppContext, domain::payments::watch::WatchOptions};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Cadence and limit of `GET /payments/{payment}/status?wait=true`.
    pub(crate) payment_watch: WatchOptions,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, payment_watch: WatchOptions) -> Arc<Self> {
        Arc::new(Self { app, payment_watch })
    }
}
