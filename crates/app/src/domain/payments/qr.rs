//! QR codes for QRIS payments.
//!
//! The payment URI is rendered to a PNG and written below the media root at a path
//! derived from the payment id, so regenerating a code overwrites the same file.

use std::path::{Path, PathBuf};

use image::{Luma, codecs::png::PngEncoder};
use mockall::automock;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

use crate::domain::payments::records::PaymentUuid;

/// Directory below the media root holding QR images.
pub const QR_CODE_DIR: &str = "qrcodes";

/// Pixel size of one QR module.
const MODULE_SIZE: u32 = 10;

#[derive(Debug, Error)]
pub enum QrCodeError {
    #[error("payment URI cannot be encoded as a QR code")]
    Encode(#[from] qrcode::types::QrError),

    #[error("failed to write PNG")]
    Png(#[from] image::ImageError),

    #[error("failed to store QR image")]
    Io(#[from] std::io::Error),
}

/// Where QR payloads point and where rendered images are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentsConfig {
    /// Prefix of the payment URI, e.g. `https://eatsight.com`.
    pub base_url: String,

    /// Directory QR images are written below.
    pub media_root: PathBuf,
}

impl PaymentsConfig {
    /// `<base_url>/pay/<payment id>`
    #[must_use]
    pub fn payment_uri(&self, payment: PaymentUuid) -> String {
        format!("{}/pay/{payment}", self.base_url.trim_end_matches('/'))
    }

    /// `<media_root>/qrcodes/<payment id>.png`
    #[must_use]
    pub fn qr_image_path(&self, payment: PaymentUuid) -> PathBuf {
        self.media_root
            .join(QR_CODE_DIR)
            .join(format!("{payment}.png"))
    }
}

/// Turns a payload into PNG bytes.
#[automock]
pub trait QrCodeRenderer: Send + Sync {
    /// Render `data` as a PNG image.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload does not fit in a QR code or PNG encoding fails.
    fn render_png(&self, data: &str) -> Result<Vec<u8>, QrCodeError>;
}

/// Black-on-white PNG renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngQrCodeRenderer;

impl QrCodeRenderer for PngQrCodeRenderer {
    fn render_png(&self, data: &str) -> Result<Vec<u8>, QrCodeError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)?;

        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(MODULE_SIZE, MODULE_SIZE)
            .build();

        let mut png = Vec::new();

        image.write_with_encoder(PngEncoder::new(&mut png))?;

        Ok(png)
    }
}

/// Write `png` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error when the directory or file cannot be written.
pub async fn store_png(path: &Path, png: &[u8]) -> Result<(), QrCodeError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, png).await?;

    Ok(())
}
