//! Eatsight prelude.
//!
//! Convenience exports for common library consumers.
//!
//! ```
//! use eatsight::prelude::*;
//!
//! let next = OrderStatus::InProgress.transition(OrderStatus::Cancelled);
//!
//! assert_eq!(next, Some(OrderStatus::Cancelled));
//! assert_eq!(PaymentType::Qris.verification_type(), VerificationType::Qris);
//! ```

pub use crate::{
    discounts::{DiscountError, VoucherDiscount},
    orders::{OrderMode, OrderStatus, UnknownVariant},
    payments::{
        PAYMENT_WINDOW, PaymentOutcome, PaymentStatus, PaymentType, VerificationStatus,
        VerificationType, payment_deadline,
    },
    pricing::{
        MAX_AMOUNT, MAX_QUANTITY, OrderTotals, PricedLine, PricedSelection, PricingError,
        check_quantity, round_money, storable_amount, subtotal,
    },
    vouchers::{RedemptionError, RedemptionTerms},
};
