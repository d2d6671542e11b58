//! Tests for transaction normalization and the fee identity.

use crate::errors::Error;
use crate::transactions::{reconcile_fee, NewTransaction, Transaction};
use chrono::NaiveDateTime;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn transfer(gross: Decimal) -> NewTransaction {
    NewTransaction {
        recipient_id: Some("a".to_string()),
        sender_id: Some("b".to_string()),
        gross_amount: gross,
        ..Default::default()
    }
}

#[test]
fn test_net_defaults_to_gross_minus_fee() {
    let tx = NewTransaction {
        transaction_fee: Some(dec!(1.5)),
        ..transfer(dec!(100))
    }
    .normalized()
    .unwrap();

    assert_eq!(tx.net_amount, Some(dec!(98.5)));
    assert_eq!(tx.transaction_fee, Some(dec!(1.5)));
}

#[test]
fn test_inconsistent_fee_is_recomputed() {
    let tx = NewTransaction {
        net_amount: Some(dec!(95)),
        transaction_fee: Some(dec!(1)),
        ..transfer(dec!(100))
    }
    .normalized()
    .unwrap();

    assert_eq!(tx.transaction_fee, Some(dec!(5)));
}

#[test]
fn test_without_fee_or_net_everything_is_net() {
    let tx = transfer(dec!(42)).normalized().unwrap();

    assert_eq!(tx.net_amount, Some(dec!(42)));
    assert_eq!(tx.transaction_fee, Some(dec!(0)));
    assert_eq!(tx.category.as_deref(), Some(""));
}

#[test]
fn test_requires_an_endpoint() {
    let result = NewTransaction {
        recipient_id: Some("  ".to_string()),
        sender_id: None,
        gross_amount: dec!(10),
        ..Default::default()
    }
    .normalized();

    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_rejects_self_transfer() {
    let result = NewTransaction {
        sender_id: Some("a".to_string()),
        ..transfer(dec!(10))
    }
    .normalized();

    assert!(result.is_err());
}

#[test]
fn test_rejects_negative_and_inverted_amounts() {
    assert!(transfer(dec!(-1)).normalized().is_err());
    assert!(NewTransaction {
        net_amount: Some(dec!(11)),
        ..transfer(dec!(10))
    }
    .normalized()
    .is_err());
}

#[test]
fn test_balance_deltas_follow_direction() {
    let now = NaiveDateTime::default();
    let tx = Transaction {
        id: "t1".to_string(),
        category: String::new(),
        recipient_id: Some("a".to_string()),
        sender_id: Some("b".to_string()),
        confirmed_by_recipient: false,
        confirmed_by_sender: false,
        gross_amount: dec!(10),
        net_amount: dec!(9),
        transaction_fee: dec!(1),
        description: String::new(),
        balance_applied: false,
        created_at: now,
        updated_at: now,
    };

    assert_eq!(
        tx.balance_deltas(),
        vec![("a".to_string(), dec!(9)), ("b".to_string(), dec!(-9))]
    );
    assert!(tx.touches("b"));
    assert!(!tx.touches("c"));
}

fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000_000i64).prop_map(|units| Decimal::new(units, 4))
}

proptest! {
    #[test]
    fn prop_fee_identity_holds(gross in amount(), net_share in 0u32..=100, fee in proptest::option::of(amount())) {
        let net = (gross * Decimal::from(net_share) / Decimal::from(100)).round_dp(8);
        let fee = reconcile_fee(gross, net, fee);
        prop_assert_eq!(net + fee, gross);
    }

    #[test]
    fn prop_normalized_amounts_are_consistent(gross in amount(), fee in proptest::option::of(amount())) {
        let tx = NewTransaction { transaction_fee: fee, ..transfer(gross) };
        if let Ok(tx) = tx.normalized() {
            let net = tx.net_amount.unwrap();
            let fee = tx.transaction_fee.unwrap();
            prop_assert!(net <= tx.gross_amount);
            prop_assert_eq!(net + fee, tx.gross_amount);
        }
    }
}
