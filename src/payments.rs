//! Payments
//!
//! Payment types, statuses and the verification record each type requires.

use std::{fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::orders::UnknownVariant;

/// How long a payment may stay pending before its deadline passes.
pub const PAYMENT_WINDOW: SignedDuration = SignedDuration::from_mins(8);

/// Payment type chosen by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// QR code payment; requires a rendered, time-limited QR code.
    Qris,

    /// Debit card.
    DebitCard,

    /// Credit card.
    CreditCard,

    /// Cash handed to a cashier.
    Cash,
}

impl PaymentType {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qris => "qris",
            Self::DebitCard => "debit_card",
            Self::CreditCard => "credit_card",
            Self::Cash => "cash",
        }
    }

    /// The verification category a payment of this type is confirmed through.
    #[must_use]
    pub const fn verification_type(self) -> VerificationType {
        match self {
            Self::Qris => VerificationType::Qris,
            Self::DebitCard | Self::CreditCard => VerificationType::Card,
            Self::Cash => VerificationType::Cash,
        }
    }

    /// Whether a QR code must be generated alongside the payment.
    #[must_use]
    pub const fn requires_qr_code(self) -> bool {
        matches!(self, Self::Qris)
    }

    /// Synthesise a transaction id, e.g. `QRIS-20260214093000`.
    #[must_use]
    pub fn transaction_id(self, at: Timestamp) -> String {
        format!(
            "{}-{}",
            self.as_str().to_ascii_uppercase(),
            at.strftime("%Y%m%d%H%M%S")
        )
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "qris" => Ok(Self::Qris),
            "debit_card" => Ok(Self::DebitCard),
            "credit_card" => Ok(Self::CreditCard),
            "cash" => Ok(Self::Cash),
            other => Err(UnknownVariant::new("payment type", other)),
        }
    }
}

/// Payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting verification.
    Pending,

    /// Verified as paid.
    Completed,

    /// Rejected.
    Failed,
}

impl PaymentStatus {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Only pending payments accept a verification outcome.
    #[must_use]
    pub const fn accepts_verification(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownVariant::new("payment status", other)),
        }
    }
}

/// Final outcome reported by whoever verifies a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Money received.
    Completed,

    /// Money not received.
    Failed,
}

impl PaymentOutcome {
    /// The payment status this outcome moves a pending payment to.
    #[must_use]
    pub const fn payment_status(self) -> PaymentStatus {
        match self {
            Self::Completed => PaymentStatus::Completed,
            Self::Failed => PaymentStatus::Failed,
        }
    }

    /// The verification status recorded alongside this outcome.
    #[must_use]
    pub const fn verification_status(self) -> VerificationStatus {
        match self {
            Self::Completed => VerificationStatus::Verified,
            Self::Failed => VerificationStatus::Rejected,
        }
    }
}

impl FromStr for PaymentOutcome {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownVariant::new("payment outcome", other)),
        }
    }
}

/// Verification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    /// Confirmed by the QRIS network.
    Qris,

    /// Confirmed by the card terminal.
    Card,

    /// Confirmed by a cashier.
    Cash,
}

impl VerificationType {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qris => "qris",
            Self::Card => "card",
            Self::Cash => "cash",
        }
    }
}

impl FromStr for VerificationType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "qris" => Ok(Self::Qris),
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            other => Err(UnknownVariant::new("verification type", other)),
        }
    }
}

/// Verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No outcome recorded yet.
    Pending,

    /// Payment confirmed.
    Verified,

    /// Payment rejected.
    Rejected,
}

impl VerificationStatus {
    /// Database / wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            other => Err(UnknownVariant::new("verification status", other)),
        }
    }
}

/// Deadline for a payment created at `created_at`.
///
/// # Errors
///
/// Returns an error when the deadline would fall outside the supported timestamp range.
pub fn payment_deadline(created_at: Timestamp) -> Result<Timestamp, jiff::Error> {
    created_at.checked_add(PAYMENT_WINDOW)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn every_payment_type_maps_to_a_verification_type() {
        assert_eq!(PaymentType::Qris.verification_type(), VerificationType::Qris);
        assert_eq!(
            PaymentType::DebitCard.verification_type(),
            VerificationType::Card
        );
        assert_eq!(
            PaymentType::CreditCard.verification_type(),
            VerificationType::Card
        );
        assert_eq!(PaymentType::Cash.verification_type(), VerificationType::Cash);
    }

    #[test]
    fn only_qris_requires_a_qr_code() {
        assert!(PaymentType::Qris.requires_qr_code());
        assert!(!PaymentType::DebitCard.requires_qr_code());
        assert!(!PaymentType::CreditCard.requires_qr_code());
        assert!(!PaymentType::Cash.requires_qr_code());
    }

    #[test]
    fn transaction_id_uses_uppercase_type_and_utc_timestamp() -> TestResult {
        let at: Timestamp = "2026-02-14T09:30:00Z".parse()?;

        assert_eq!(
            PaymentType::Qris.transaction_id(at),
            "QRIS-20260214093000"
        );
        assert_eq!(
            PaymentType::DebitCard.transaction_id(at),
            "DEBIT_CARD-20260214093000"
        );

        Ok(())
    }

    #[test]
    fn deadline_is_eight_minutes_after_creation() -> TestResult {
        let created_at: Timestamp = "2026-02-14T09:30:00Z".parse()?;
        let expected: Timestamp = "2026-02-14T09:38:00Z".parse()?;

        assert_eq!(payment_deadline(created_at)?, expected);

        Ok(())
    }

    #[test]
    fn outcomes_map_to_status_pairs() {
        assert_eq!(
            PaymentOutcome::Completed.payment_status(),
            PaymentStatus::Completed
        );
        assert_eq!(
            PaymentOutcome::Completed.verification_status(),
            VerificationStatus::Verified
        );
        assert_eq!(
            PaymentOutcome::Failed.payment_status(),
            PaymentStatus::Failed
        );
        assert_eq!(
            PaymentOutcome::Failed.verification_status(),
            VerificationStatus::Rejected
        );
    }

    #[test]
    fn only_pending_accepts_verification() {
        assert!(PaymentStatus::Pending.accepts_verification());
        assert!(!PaymentStatus::Completed.accepts_verification());
        assert!(!PaymentStatus::Failed.accepts_verification());
    }

    #[test]
    fn unknown_payment_type_is_rejected() {
        assert!("bank_transfer".parse::<PaymentType>().is_err());
    }
}
