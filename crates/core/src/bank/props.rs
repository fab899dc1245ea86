//! Property-based tests for running balances.
//!
//! - The current balance equals opening + incoming - outgoing
//! - Each line's balance is the previous balance plus its signed amount
//! - Input order never changes the statement

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockbook_shared::types::{BankAccountId, Currency, PaymentId};
use uuid::Uuid;

use super::service::BankLedger;
use super::types::BankAccount;
use crate::currency::RateTable;
use crate::payments::{Payment, PaymentCategory};

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// (day of month, amount) pairs. Few days so timestamps collide often.
fn flows() -> impl Strategy<Value = Vec<(u32, Decimal)>> {
    prop::collection::vec((1u32..4, amount()), 0..12)
}

fn account(initial: Decimal) -> BankAccount {
    BankAccount {
        id: BankAccountId::from_uuid(Uuid::from_u128(1)),
        name: "Main".to_string(),
        currency: Currency::Azn,
        initial_balance: initial,
        creation_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn to_payments(flows: &[(u32, Decimal)], id_offset: u128, account: &BankAccount) -> Vec<Payment> {
    flows
        .iter()
        .enumerate()
        .map(|(i, (day, amount))| Payment {
            id: PaymentId::from_uuid(Uuid::from_u128(id_offset + i as u128)),
            order_id: None,
            category: PaymentCategory::Manual("misc".to_string()),
            bank_account_id: account.id,
            date: Utc.with_ymd_and_hms(2024, 2, *day, 9, 0, 0).unwrap(),
            amount: *amount,
            currency: Currency::Azn,
            exchange_rate: None,
            method: String::new(),
            description: None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Final balance is the opening balance plus net flow.
    #[test]
    fn prop_current_balance_is_net_flow(
        initial in amount(),
        ins in flows(),
        outs in flows(),
    ) {
        let rates = RateTable::pivot_only(Currency::Azn);
        let acc = account(initial);
        let incoming = to_payments(&ins, 1_000, &acc);
        let outgoing = to_payments(&outs, 2_000, &acc);

        let balances = BankLedger::compute_running_balances(
            std::slice::from_ref(&acc), &incoming, &outgoing, &rates,
        );

        let expected = initial
            + ins.iter().map(|(_, a)| *a).sum::<Decimal>()
            - outs.iter().map(|(_, a)| *a).sum::<Decimal>();
        prop_assert_eq!(balances.current_balance(acc.id), Some(expected));
    }

    /// Every line chains from the one before it.
    #[test]
    fn prop_lines_chain(initial in amount(), ins in flows(), outs in flows()) {
        let rates = RateTable::pivot_only(Currency::Azn);
        let acc = account(initial);
        let incoming = to_payments(&ins, 1_000, &acc);
        let outgoing = to_payments(&outs, 2_000, &acc);

        let balances = BankLedger::compute_running_balances(
            std::slice::from_ref(&acc), &incoming, &outgoing, &rates,
        );
        let lines = &balances.statement(acc.id).unwrap().lines;

        prop_assert_eq!(lines.len(), 1 + ins.len() + outs.len());
        prop_assert_eq!(lines[0].balance_after, initial);
        for pair in lines.windows(2) {
            prop_assert_eq!(pair[1].balance_after, pair[0].balance_after + pair[1].signed_amount());
            prop_assert!(pair[0].sort_key() <= pair[1].sort_key());
        }
    }

    /// Reversing the input collections yields the same statement.
    #[test]
    fn prop_input_order_irrelevant(initial in amount(), ins in flows(), outs in flows()) {
        let rates = RateTable::pivot_only(Currency::Azn);
        let acc = account(initial);
        let incoming = to_payments(&ins, 1_000, &acc);
        let outgoing = to_payments(&outs, 2_000, &acc);
        let incoming_rev: Vec<Payment> = incoming.iter().rev().cloned().collect();
        let outgoing_rev: Vec<Payment> = outgoing.iter().rev().cloned().collect();

        let accounts = std::slice::from_ref(&acc);
        let forward = BankLedger::compute_running_balances(accounts, &incoming, &outgoing, &rates);
        let backward = BankLedger::compute_running_balances(accounts, &incoming_rev, &outgoing_rev, &rates);
        prop_assert_eq!(forward, backward);
    }
}
