//! Payments Data

use eatsight::payments::{PaymentOutcome, PaymentType};
use rust_decimal::Decimal;

use crate::domain::{
    menu::records::TableUuid,
    orders::records::OrderUuid,
    payments::records::{PaymentMethodUuid, PaymentUuid},
};

/// New Payment Method Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentMethod {
    pub uuid: PaymentMethodUuid,
    pub kind: PaymentType,
    pub card_number_last4: Option<String>,
    pub card_brand: Option<String>,
    pub holder_name: Option<String>,

    /// Makes this the user's only default method.
    pub is_default: bool,
}

/// New Payment Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    pub uuid: PaymentUuid,
    pub order: OrderUuid,
    pub payment_type: PaymentType,
    pub amount: Decimal,
    pub payment_method: Option<PaymentMethodUuid>,

    /// Table the cashier should collect from; only kept for cash payments.
    pub table: Option<TableUuid>,
}

/// Outcome reported by whoever confirmed the payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentVerification {
    pub outcome: PaymentOutcome,
    pub message: Option<String>,
    pub cashier_name: Option<String>,
}
