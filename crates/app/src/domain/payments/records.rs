//! Payment Records

use eatsight::payments::{PaymentStatus, PaymentType, VerificationStatus, VerificationType};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{menu::records::TableUuid, orders::records::OrderUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Payment UUID
pub type PaymentUuid = TypedUuid<PaymentRecord>;

/// Payment Method UUID
pub type PaymentMethodUuid = TypedUuid<PaymentMethodRecord>;

/// QR Code UUID
pub type QrCodeUuid = TypedUuid<QrCodeRecord>;

/// Payment Verification UUID
pub type PaymentVerificationUuid = TypedUuid<PaymentVerificationRecord>;

/// Payment Method Record
#[derive(Debug, Clone)]
pub struct PaymentMethodRecord {
    pub uuid: PaymentMethodUuid,
    pub user_uuid: UserUuid,
    pub kind: PaymentType,
    pub card_number_last4: Option<String>,
    pub card_brand: Option<String>,
    pub holder_name: Option<String>,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payment Record
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub uuid: PaymentUuid,
    pub order_uuid: OrderUuid,
    pub payment_method_uuid: Option<PaymentMethodUuid>,
    pub payment_type: PaymentType,
    pub amount: Decimal,
    pub status: PaymentStatus,

    /// Set once, when the payment completes.
    pub transaction_id: Option<String>,

    pub payment_deadline: Timestamp,
    pub payment_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Present for QRIS payments; `None` in list results.
    pub qr_code: Option<QrCodeRecord>,

    /// `None` in list results.
    pub verification: Option<PaymentVerificationRecord>,
}

/// QR Code Record
#[derive(Debug, Clone)]
pub struct QrCodeRecord {
    pub uuid: QrCodeUuid,
    pub payment_uuid: PaymentUuid,
    pub qr_data: String,
    pub qr_image_path: String,
    pub is_downloaded: bool,
    pub is_shared: bool,
    pub expiry_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payment Verification Record
#[derive(Debug, Clone)]
pub struct PaymentVerificationRecord {
    pub uuid: PaymentVerificationUuid,
    pub payment_uuid: PaymentUuid,
    pub verification_type: VerificationType,
    pub verification_status: VerificationStatus,
    pub verification_message: Option<String>,
    pub cashier_name: Option<String>,
    pub table_uuid: Option<TableUuid>,
    pub verified_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of a verification attempt.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// `false` when the payment had already left `pending` and nothing changed.
    pub applied: bool,
    pub payment: PaymentRecord,
}

/// Point-in-time view of a payment, pushed to status subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStatusUpdate {
    pub payment_uuid: PaymentUuid,
    pub status: PaymentStatus,
    pub verification_status: Option<VerificationStatus>,
    pub message: Option<String>,
    pub checked_at: Timestamp,
}
