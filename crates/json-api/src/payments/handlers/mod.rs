//! Payment Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod methods;
pub(crate) mod qr_code;
pub(crate) mod share_qr_code;
pub(crate) mod status;

#[cfg(test)]
mod tests {
    use eatsight::payments::{PaymentStatus, PaymentType, VerificationStatus, VerificationType};
    use eatsight_app::domain::{
        orders::records::OrderUuid,
        payments::records::{
            PaymentRecord, PaymentUuid, PaymentVerificationRecord, PaymentVerificationUuid,
            QrCodeRecord, QrCodeUuid,
        },
    };
    use jiff::Timestamp;
    use rust_decimal_macros::dec;

    pub(crate) fn make_qr_code(payment: PaymentUuid) -> QrCodeRecord {
        QrCodeRecord {
            uuid: QrCodeUuid::new(),
            payment_uuid: payment,
            qr_data: format!("https://eatsight.test/pay/{payment}"),
            qr_image_path: format!("media/qrcodes/{payment}.png"),
            is_downloaded: false,
            is_shared: false,
            expiry_time: Timestamp::UNIX_EPOCH,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    /// A pending 45000 QRIS payment with its QR code and verification record.
    pub(crate) fn make_payment(uuid: PaymentUuid) -> PaymentRecord {
        PaymentRecord {
            uuid,
            order_uuid: OrderUuid::new(),
            payment_method_uuid: None,
            payment_type: PaymentType::Qris,
            amount: dec!(45000),
            status: PaymentStatus::Pending,
            transaction_id: None,
            payment_deadline: Timestamp::UNIX_EPOCH,
            payment_date: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            qr_code: Some(make_qr_code(uuid)),
            verification: Some(PaymentVerificationRecord {
                uuid: PaymentVerificationUuid::new(),
                payment_uuid: uuid,
                verification_type: VerificationType::Qris,
                verification_status: VerificationStatus::Pending,
                verification_message: None,
                cashier_name: None,
                table_uuid: None,
                verified_at: None,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }),
        }
    }
}
