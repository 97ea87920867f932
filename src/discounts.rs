//! Discounts
//!
//! Converts a voucher's terms into a concrete discount against an order subtotal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::round_money;

/// Errors specific to voucher discount terms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Percentage outside `0..=100`.
    #[error("discount percentage must be between 0 and 100")]
    PercentageOutOfRange,

    /// Flat value below zero.
    #[error("discount value cannot be negative")]
    NegativeValue,
}

/// The discount a voucher grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum VoucherDiscount {
    /// Percentage of the order subtotal, e.g. `10` for 10 %.
    Percentage(Decimal),

    /// Flat amount off.
    Flat(Decimal),
}

impl VoucherDiscount {
    /// Resolve a voucher's stored terms.
    ///
    /// A non-zero percentage takes precedence over the flat value.
    ///
    /// # Errors
    ///
    /// Returns an error when the percentage is outside `0..=100` or the value is
    /// negative.
    pub fn from_terms(value: Decimal, percentage: Option<Decimal>) -> Result<Self, DiscountError> {
        match percentage {
            Some(percentage) if !percentage.is_zero() => {
                if percentage.is_sign_negative() || percentage > Decimal::ONE_HUNDRED {
                    return Err(DiscountError::PercentageOutOfRange);
                }

                Ok(Self::Percentage(percentage))
            }
            _ => {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(DiscountError::NegativeValue);
                }

                Ok(Self::Flat(value))
            }
        }
    }

    /// Discount owed on `subtotal`, never more than the subtotal itself.
    #[must_use]
    pub fn amount_for(&self, subtotal: Decimal) -> Decimal {
        let raw = match self {
            Self::Percentage(percentage) => subtotal * *percentage / Decimal::ONE_HUNDRED,
            Self::Flat(value) => *value,
        };

        round_money(raw.min(subtotal).max(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percentage_takes_precedence_over_value() -> TestResult {
        let discount = VoucherDiscount::from_terms(dec!(5000), Some(dec!(10)))?;

        assert_eq!(discount, VoucherDiscount::Percentage(dec!(10)));

        Ok(())
    }

    #[test]
    fn zero_percentage_falls_back_to_flat_value() -> TestResult {
        let discount = VoucherDiscount::from_terms(dec!(5000), Some(dec!(0)))?;

        assert_eq!(discount, VoucherDiscount::Flat(dec!(5000)));

        Ok(())
    }

    #[test]
    fn ten_percent_of_one_hundred_thousand() -> TestResult {
        let discount = VoucherDiscount::from_terms(dec!(0), Some(dec!(10)))?;

        assert_eq!(discount.amount_for(dec!(100000)), dec!(10000));

        Ok(())
    }

    #[test]
    fn flat_value_is_capped_at_subtotal() -> TestResult {
        let discount = VoucherDiscount::from_terms(dec!(10000), None)?;

        assert_eq!(discount.amount_for(dec!(5000)), dec!(5000));

        Ok(())
    }

    #[test]
    fn fractional_percentages_round_to_cents() -> TestResult {
        let discount = VoucherDiscount::from_terms(dec!(0), Some(dec!(12.5)))?;

        assert_eq!(discount.amount_for(dec!(333.33)), dec!(41.67));

        Ok(())
    }

    #[test]
    fn invalid_terms_are_rejected() {
        assert_eq!(
            VoucherDiscount::from_terms(dec!(0), Some(dec!(150))),
            Err(DiscountError::PercentageOutOfRange)
        );
        assert_eq!(
            VoucherDiscount::from_terms(dec!(-1), None),
            Err(DiscountError::NegativeValue)
        );
    }
}
