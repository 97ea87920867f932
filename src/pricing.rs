//! Pricing
//!
//! Subtotal and order total arithmetic. Everything is exact decimal; amounts are
//! kept at two decimal places to match the stored `NUMERIC(12, 2)` columns.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places monetary amounts are stored with.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `NUMERIC(12, 2)` column holds: `9999999999.99`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, MONEY_SCALE);

/// Largest quantity an `INTEGER` column holds.
pub const MAX_QUANTITY: u32 = 2_147_483_647;

/// Errors that can occur while pricing an order.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// No line items were provided.
    #[error("an order needs at least one item")]
    NoItems,

    /// A quantity was zero.
    #[error("quantities must be at least 1")]
    InvalidQuantity,

    /// A price or fee was negative.
    #[error("monetary amounts cannot be negative")]
    NegativeAmount,

    /// A quantity does not fit the stored column.
    #[error("quantities cannot exceed {}", MAX_QUANTITY)]
    QuantityTooLarge,

    /// An amount does not fit the stored column.
    #[error("monetary amounts cannot exceed {}", MAX_AMOUNT)]
    AmountTooLarge,

    /// A discount larger than the subtotal was supplied.
    #[error("discount exceeds subtotal")]
    DiscountExceedsSubtotal,

    /// Arithmetic left the representable decimal range.
    #[error("amount overflowed")]
    Overflow,
}

/// Round an amount to the stored monetary scale.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an amount and check it fits a monetary column.
///
/// # Errors
///
/// - [`PricingError::NegativeAmount`]: the rounded amount is below zero.
/// - [`PricingError::AmountTooLarge`]: the rounded amount exceeds [`MAX_AMOUNT`].
pub fn storable_amount(amount: Decimal) -> Result<Decimal, PricingError> {
    let rounded = round_money(amount);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        return Err(PricingError::NegativeAmount);
    }

    if rounded > MAX_AMOUNT {
        return Err(PricingError::AmountTooLarge);
    }

    Ok(rounded)
}

/// Check a quantity is at least 1 and fits its column.
///
/// # Errors
///
/// [`PricingError::InvalidQuantity`] for zero, [`PricingError::QuantityTooLarge`]
/// above [`MAX_QUANTITY`].
pub const fn check_quantity(quantity: u32) -> Result<u32, PricingError> {
    match quantity {
        0 => Err(PricingError::InvalidQuantity),
        q if q > MAX_QUANTITY => Err(PricingError::QuantityTooLarge),
        q => Ok(q),
    }
}

/// A priced selection (option or topping) attached to a line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedSelection {
    /// Unit price snapshot.
    pub price: Decimal,

    /// Number of units.
    pub quantity: u32,
}

impl PricedSelection {
    /// `price × quantity`.
    ///
    /// # Errors
    ///
    /// Fails on zero quantity, negative price or overflow.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        extend(self.price, self.quantity)
    }
}

/// A priced line item with its selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    /// Unit price snapshot of the menu item.
    pub price: Decimal,

    /// Number of units.
    pub quantity: u32,

    /// Selected options.
    pub options: Vec<PricedSelection>,

    /// Selected toppings.
    pub toppings: Vec<PricedSelection>,
}

impl PricedLine {
    /// Line total: `price × quantity + Σ option totals + Σ topping totals`.
    ///
    /// # Errors
    ///
    /// Fails on zero quantity, negative price or overflow anywhere in the line.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        self.options
            .iter()
            .chain(&self.toppings)
            .try_fold(extend(self.price, self.quantity)?, |acc, selection| {
                acc.checked_add(selection.total()?)
                    .ok_or(PricingError::Overflow)
            })
    }
}

/// Sum of all line totals.
///
/// # Errors
///
/// - [`PricingError::NoItems`]: `lines` is empty.
/// - [`PricingError::AmountTooLarge`]: the sum does not fit a monetary column.
/// - any error from [`PricedLine::total`].
pub fn subtotal(lines: &[PricedLine]) -> Result<Decimal, PricingError> {
    if lines.is_empty() {
        return Err(PricingError::NoItems);
    }

    let total = lines.iter().try_fold(Decimal::ZERO, |acc, line| {
        acc.checked_add(line.total()?).ok_or(PricingError::Overflow)
    })?;

    storable_amount(total)
}

fn extend(price: Decimal, quantity: u32) -> Result<Decimal, PricingError> {
    check_quantity(quantity)?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(PricingError::NegativeAmount);
    }

    price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// The four monetary columns of an order.
///
/// Construction and discount application both preserve
/// `total_amount == subtotal + order_fee - discount_amount` and
/// `discount_amount <= subtotal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    subtotal: Decimal,
    order_fee: Decimal,
    discount_amount: Decimal,
    total_amount: Decimal,
}

impl OrderTotals {
    /// Totals for a fresh order with no discount applied.
    ///
    /// # Errors
    ///
    /// Fails when either amount is negative or the sum overflows.
    pub fn new(subtotal: Decimal, order_fee: Decimal) -> Result<Self, PricingError> {
        Self::with_discount(subtotal, order_fee, Decimal::ZERO)
    }

    /// Rebuild totals from stored columns, recomputing the total.
    ///
    /// Inputs are rounded to [`MONEY_SCALE`] before anything else, so the total
    /// is always the exact sum of the stored parts.
    ///
    /// # Errors
    ///
    /// Fails when any amount is negative or does not fit a monetary column, or
    /// the discount exceeds the subtotal.
    pub fn with_discount(
        subtotal: Decimal,
        order_fee: Decimal,
        discount_amount: Decimal,
    ) -> Result<Self, PricingError> {
        let subtotal = storable_amount(subtotal)?;
        let order_fee = storable_amount(order_fee)?;
        let discount_amount = storable_amount(discount_amount)?;

        if discount_amount > subtotal {
            return Err(PricingError::DiscountExceedsSubtotal);
        }

        let total_amount = subtotal
            .checked_add(order_fee)
            .and_then(|sum| sum.checked_sub(discount_amount))
            .ok_or(PricingError::Overflow)?;

        if total_amount > MAX_AMOUNT {
            return Err(PricingError::AmountTooLarge);
        }

        Ok(Self {
            subtotal,
            order_fee,
            discount_amount,
            total_amount,
        })
    }

    /// Adds a discount on top of any already applied, capped so the cumulative
    /// discount never exceeds the subtotal. Returns the amount actually applied.
    pub fn apply_discount(&mut self, discount: Decimal) -> Decimal {
        let headroom = self.subtotal - self.discount_amount;
        let applied = round_money(discount.max(Decimal::ZERO).min(headroom));

        self.discount_amount += applied;
        self.total_amount = self.subtotal + self.order_fee - self.discount_amount;

        applied
    }

    /// Item subtotal.
    #[must_use]
    pub const fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    /// Service fee.
    #[must_use]
    pub const fn order_fee(&self) -> Decimal {
        self.order_fee
    }

    /// Cumulative discount.
    #[must_use]
    pub const fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }

    /// Amount payable.
    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }
}
