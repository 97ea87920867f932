//! Payments Config

use std::{path::PathBuf, time::Duration};

use clap::Args;
use eatsight_app::domain::payments::{
    qr::PaymentsConfig,
    watch::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, WatchOptions},
};

/// QR code and payment status settings.
#[derive(Debug, Args)]
pub struct PaymentsSettings {
    /// Prefix of the payment URI encoded into QR codes
    #[arg(long, env = "PAYMENT_BASE_URL", default_value = "https://eatsight.com")]
    pub payment_base_url: String,

    /// Directory QR images are written below
    #[arg(long, env = "MEDIA_ROOT", default_value = "media")]
    pub media_root: PathBuf,

    /// Seconds between two status checks while a client waits on a payment
    #[arg(long, env = "PAYMENT_STATUS_INTERVAL_SECONDS", default_value_t = DEFAULT_INTERVAL.as_secs())]
    pub payment_status_interval_seconds: u64,

    /// Seconds a client may wait on a payment before the current status is returned
    #[arg(long, env = "PAYMENT_STATUS_TIMEOUT_SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub payment_status_timeout_seconds: u64,
}

impl PaymentsSettings {
    #[must_use]
    pub fn payments_config(&self) -> PaymentsConfig {
        PaymentsConfig {
            base_url: self.payment_base_url.clone(),
            media_root: self.media_root.clone(),
        }
    }

    #[must_use]
    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            interval: Duration::from_secs(self.payment_status_interval_seconds),
            timeout: Duration::from_secs(self.payment_status_timeout_seconds),
        }
    }
}
