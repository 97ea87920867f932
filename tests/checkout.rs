//! Integration tests for pricing an order and spending vouchers on it

use jiff::civil::date;
use rust_decimal_macros::dec;
use testresult::TestResult;

use eatsight::{
    discounts::VoucherDiscount,
    orders::OrderStatus,
    payments::{PaymentOutcome, PaymentStatus, PaymentType, VerificationStatus},
    pricing::{OrderTotals, PricedLine, PricedSelection, subtotal},
    vouchers::{RedemptionError, RedemptionTerms},
};

fn assert_consistent(totals: &OrderTotals) {
    assert_eq!(
        totals.total_amount(),
        totals.subtotal() + totals.order_fee() - totals.discount_amount(),
        "total must equal subtotal + fee - discount"
    );
    assert!(
        totals.discount_amount() <= totals.subtotal(),
        "discount {} exceeds subtotal {}",
        totals.discount_amount(),
        totals.subtotal()
    );
}

#[test]
fn lines_with_extras_price_into_subtotal() -> TestResult {
    let lines = [
        PricedLine {
            price: dec!(25000),
            quantity: 2,
            options: vec![PricedSelection {
                price: dec!(5000),
                quantity: 1,
            }],
            toppings: vec![PricedSelection {
                price: dec!(2000),
                quantity: 3,
            }],
        },
        PricedLine {
            price: dec!(8000),
            quantity: 1,
            options: Vec::new(),
            toppings: Vec::new(),
        },
    ];

    // 25000 * 2 + 5000 + 2000 * 3 + 8000
    assert_eq!(subtotal(&lines)?, dec!(69000));

    Ok(())
}

#[test]
fn stacked_vouchers_never_discount_past_subtotal() -> TestResult {
    let mut totals = OrderTotals::new(dec!(100000), dec!(5000))?;

    let ten_percent = VoucherDiscount::from_terms(dec!(0), Some(dec!(10)))?;
    let applied = totals.apply_discount(ten_percent.amount_for(totals.subtotal()));

    assert_eq!(applied, dec!(10000));
    assert_consistent(&totals);

    let flat = VoucherDiscount::from_terms(dec!(95000), None)?;
    let applied = totals.apply_discount(flat.amount_for(totals.subtotal()));

    assert_eq!(applied, dec!(90000), "second voucher is capped by remaining headroom");
    assert_eq!(totals.discount_amount(), dec!(100000));
    assert_eq!(totals.total_amount(), dec!(5000), "only the fee remains payable");
    assert_consistent(&totals);

    Ok(())
}

#[test]
fn flat_voucher_larger_than_small_order_is_capped() -> TestResult {
    let mut totals = OrderTotals::new(dec!(5000), dec!(0))?;

    let flat = VoucherDiscount::from_terms(dec!(10000), None)?;

    assert_eq!(totals.apply_discount(flat.amount_for(totals.subtotal())), dec!(5000));
    assert_eq!(totals.total_amount(), dec!(0));
    assert_consistent(&totals);

    Ok(())
}

#[test]
fn redemption_checks_run_in_order() {
    let today = date(2026, 3, 1);

    let terms = RedemptionTerms {
        points_cost: 500,
        is_active: true,
        expiry_date: Some(today),
    };

    assert_eq!(terms.check(0, today), Err(RedemptionError::Expired(today)));
    assert_eq!(terms.check(600, date(2026, 2, 28)), Ok(()));
    assert_eq!(
        terms.check(499, date(2026, 2, 28)),
        Err(RedemptionError::InsufficientPoints {
            required: 500,
            available: 499,
        })
    );
}

#[test]
fn completed_qris_payment_settles_its_order() {
    let outcome = PaymentOutcome::Completed;

    assert_eq!(outcome.payment_status(), PaymentStatus::Completed);
    assert_eq!(outcome.verification_status(), VerificationStatus::Verified);
    assert!(PaymentType::Qris.requires_qr_code());
    assert_eq!(
        OrderStatus::InProgress.transition(OrderStatus::Completed),
        Some(OrderStatus::Completed)
    );
    assert_eq!(OrderStatus::Completed.transition(OrderStatus::Cancelled), None);
}
