//! Payment status subscriptions.
//!
//! A watcher polls [`PaymentsService::check_payment_status`] on a fixed interval and
//! forwards every update to a bounded channel. It stops once the payment leaves
//! `pending`, when a check fails, when the timeout elapses or when the receiver is
//! dropped.

use std::{sync::Arc, time::Duration};

use eatsight::payments::PaymentStatus;
use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval, sleep},
};
use tracing::{Instrument, debug, info_span};

use crate::domain::{
    payments::{
        PaymentsService, PaymentsServiceError,
        records::{PaymentStatusUpdate, PaymentUuid},
    },
    users::records::UserUuid,
};

/// Default time between two status checks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default lifetime of a subscription; a little longer than the payment window.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10 * 60);

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Polling cadence and lifetime of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Receiving half of a payment status subscription.
pub type PaymentStatusStream = mpsc::Receiver<Result<PaymentStatusUpdate, PaymentsServiceError>>;

/// Start watching one of the user's payments.
///
/// The first check runs immediately. Dropping the returned receiver cancels the watch.
pub fn watch_payment_status(
    service: Arc<dyn PaymentsService>,
    user: UserUuid,
    payment: PaymentUuid,
    options: WatchOptions,
) -> PaymentStatusStream {
    let (tx, rx) = mpsc::channel(1);

    let span = info_span!("payments.watch", user_uuid = %user, payment_uuid = %payment);

    tokio::spawn(poll(service, user, payment, options, tx).instrument(span));

    rx
}

async fn poll(
    service: Arc<dyn PaymentsService>,
    user: UserUuid,
    payment: PaymentUuid,
    options: WatchOptions,
    tx: mpsc::Sender<Result<PaymentStatusUpdate, PaymentsServiceError>>,
) {
    // The deadline also cuts short a check or send that is still in flight.
    tokio::select! {
        () = sleep(options.timeout) => debug!("watch timed out"),
        () = forward(service.as_ref(), user, payment, options.interval, &tx) => {}
    }
}

async fn forward(
    service: &dyn PaymentsService,
    user: UserUuid,
    payment: PaymentUuid,
    every: Duration,
    tx: &mpsc::Sender<Result<PaymentStatusUpdate, PaymentsServiceError>>,
) {
    let mut ticker = interval(every.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = tx.closed() => {
                debug!("subscriber went away");
                return;
            }
            _ = ticker.tick() => {}
        }

        let update = service.check_payment_status(user, payment).await;

        let finished = match &update {
            Ok(update) => update.status != PaymentStatus::Pending,
            Err(_) => true,
        };

        if tx.send(update).await.is_err() {
            debug!("subscriber went away");
            return;
        }

        if finished {
            debug!("watch finished");
            return;
        }
    }
}
