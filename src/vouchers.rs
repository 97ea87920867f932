//! Vouchers
//!
//! Rules deciding whether a voucher can be bought with reward points.

use jiff::civil::Date;
use thiserror::Error;

/// Why a redemption was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RedemptionError {
    /// The voucher has been switched off.
    #[error("voucher is inactive")]
    Inactive,

    /// The voucher's expiry date has been reached.
    #[error("voucher expired on {0}")]
    Expired(Date),

    /// The user cannot afford the voucher.
    #[error("not enough points: required {required}, available {available}")]
    InsufficientPoints {
        /// Points the voucher costs.
        required: u64,

        /// Points the user holds.
        available: u64,
    },
}

/// The parts of a voucher that govern redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedemptionTerms {
    /// Price in reward points.
    pub points_cost: u64,

    /// Whether the voucher is offered at all.
    pub is_active: bool,

    /// First day the voucher can no longer be redeemed.
    pub expiry_date: Option<Date>,
}

impl RedemptionTerms {
    /// Whether the voucher is on offer on `today`.
    ///
    /// A voucher stops being offered on its expiry date.
    #[must_use]
    pub fn is_available_on(&self, today: Date) -> bool {
        self.is_active && self.expiry_date.is_none_or(|expiry| expiry > today)
    }

    /// Check that a user holding `available` points may redeem on `today`.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: inactive, expired, then insufficient points.
    pub fn check(&self, available: u64, today: Date) -> Result<(), RedemptionError> {
        if !self.is_active {
            return Err(RedemptionError::Inactive);
        }

        if let Some(expiry) = self.expiry_date
            && expiry <= today
        {
            return Err(RedemptionError::Expired(expiry));
        }

        if available < self.points_cost {
            return Err(RedemptionError::InsufficientPoints {
                required: self.points_cost,
                available,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn terms(points_cost: u64) -> RedemptionTerms {
        RedemptionTerms {
            points_cost,
            is_active: true,
            expiry_date: Some(date(2026, 12, 31)),
        }
    }

    #[test]
    fn affordable_active_voucher_is_redeemable() {
        assert_eq!(terms(500).check(600, date(2026, 6, 1)), Ok(()));
    }

    #[test]
    fn exact_balance_is_enough() {
        assert_eq!(terms(500).check(500, date(2026, 6, 1)), Ok(()));
    }

    #[test]
    fn insufficient_points_reports_both_amounts() {
        assert_eq!(
            terms(500).check(499, date(2026, 6, 1)),
            Err(RedemptionError::InsufficientPoints {
                required: 500,
                available: 499
            })
        );
    }

    #[test]
    fn voucher_is_expired_on_its_expiry_date() {
        assert_eq!(
            terms(0).check(0, date(2026, 12, 31)),
            Err(RedemptionError::Expired(date(2026, 12, 31)))
        );
    }

    #[test]
    fn inactive_is_reported_before_points() {
        let terms = RedemptionTerms {
            is_active: false,
            ..terms(1_000)
        };

        assert_eq!(terms.check(0, date(2026, 6, 1)), Err(RedemptionError::Inactive));
    }

    #[test]
    fn vouchers_without_expiry_never_expire() {
        let terms = RedemptionTerms {
            expiry_date: None,
            ..terms(0)
        };

        assert!(terms.is_available_on(date(2099, 1, 1)));
    }
}
