//! End-to-end reservation lifecycle over the pure domain layer.
//!
//! Walks the canonical scenario: a two-line cart is checked out, approved,
//! paid through the gateway, completed, and only then opens up for
//! feedback and returns.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use sewakita_core::booking::{validate_transition, BookingStatus};
use sewakita_core::cart::{validate_date_range, validate_quantity, ItemKind};
use sewakita_core::money::{line_subtotal, order_total, parse_amount};
use sewakita_core::payment::{from_gateway_status, is_settlement_equivalent, PaymentStatus};
use sewakita_core::returns::{proposed_fine, ReturnCondition};

#[test]
fn full_reservation_lifecycle() {
    // Cart: 2x asset a1 @ 50000, 1x service s1 @ 100000.
    let lines = [
        (ItemKind::Asset, 2, parse_amount("50000").unwrap()),
        (ItemKind::Service, 1, parse_amount("100000").unwrap()),
    ];
    for (_, qty, _) in &lines {
        validate_quantity(*qty).unwrap();
    }

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
    validate_date_range(start, end).unwrap();

    // Checkout: total is the sum of submission-time subtotals.
    let total = order_total(lines.iter().map(|(_, qty, price)| (*qty, *price)));
    assert_eq!(total, Decimal::from(200_000));
    assert_eq!(
        line_subtotal(2, Decimal::from(50_000)) + line_subtotal(1, Decimal::from(100_000)),
        total
    );

    // A later catalog price change does not touch the captured total.
    let repriced_catalog = Decimal::from(75_000);
    assert_ne!(repriced_catalog, Decimal::from(50_000));
    assert_eq!(total, Decimal::from(200_000));

    // Booking starts WAITING; the admin approves it.
    let mut status = BookingStatus::Waiting;
    validate_transition(status, BookingStatus::Confirmed).unwrap();
    status = BookingStatus::Confirmed;

    // Payment is created and the gateway later reports settlement.
    let gateway_status = "settlement";
    let payment = from_gateway_status(gateway_status).unwrap();
    assert_eq!(payment, PaymentStatus::Paid);
    assert!(is_settlement_equivalent(gateway_status));

    // Completion requires CONFIRMED plus a PAID payment.
    assert_eq!(payment, PaymentStatus::Paid);
    validate_transition(status, BookingStatus::Completed).unwrap();
    status = BookingStatus::Completed;

    // The booking is now terminal; no further transitions exist.
    assert!(status.is_terminal());

    // Returns after completion: good condition carries no fine proposal,
    // damage proposes the fixed schedule.
    assert_eq!(proposed_fine(ReturnCondition::Good), None);
    assert_eq!(
        proposed_fine(ReturnCondition::MinorDamage),
        Some(Decimal::from(100_000))
    );
}

#[test]
fn completion_blocked_without_confirmed_status() {
    // WAITING -> COMPLETED is never legal, paid or not.
    assert!(validate_transition(BookingStatus::Waiting, BookingStatus::Completed).is_err());
}

#[test]
fn owner_cannot_cancel_after_confirmation() {
    assert!(validate_transition(BookingStatus::Confirmed, BookingStatus::Cancelled).is_err());
}
