//! Running balance computation.
//!
//! Each account's statement is rebuilt from scratch on every call:
//! opening line, then every payment that references the account, sorted by
//! `(date, kind, payment id)` and folded left to right.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use stockbook_shared::types::BankAccountId;
use tracing::{debug, warn};

use super::types::{AccountStatement, BankAccount, LedgerTransactionId, RunningBalances, StatementLine};
use crate::currency::{CurrencyConverter, RateTable};
use crate::payments::Payment;

/// Stateless bank statement builder.
pub struct BankLedger;

impl BankLedger {
    /// Builds a statement with running balances for every account.
    ///
    /// Payments convert into the account currency at live rates. Payments
    /// referencing an unknown account are left out.
    #[must_use]
    pub fn compute_running_balances(
        accounts: &[BankAccount],
        incoming: &[Payment],
        outgoing: &[Payment],
        rates: &RateTable,
    ) -> RunningBalances {
        let converter = CurrencyConverter::new(rates);
        let known: BTreeSet<BankAccountId> = accounts.iter().map(|a| a.id).collect();

        let orphaned = incoming
            .iter()
            .chain(outgoing)
            .filter(|p| !known.contains(&p.bank_account_id))
            .count();
        if orphaned > 0 {
            warn!(orphaned, "payments reference unknown bank accounts, leaving them out");
        }

        let mut balances = RunningBalances::default();
        for account in accounts {
            let statement = Self::build_statement(account, incoming, outgoing, converter);
            debug!(
                account_id = %account.id,
                lines = statement.lines.len(),
                balance = %statement.current_balance(),
                "statement built"
            );
            balances.insert(statement);
        }
        balances
    }

    fn build_statement(
        account: &BankAccount,
        incoming: &[Payment],
        outgoing: &[Payment],
        converter: CurrencyConverter<'_>,
    ) -> AccountStatement {
        let to_line = |payment: &Payment, id: LedgerTransactionId| StatementLine {
            id,
            date: payment.date,
            amount: converter.convert(payment.amount, payment.currency, account.currency),
            balance_after: Decimal::ZERO,
        };

        let mut lines = vec![StatementLine {
            id: LedgerTransactionId::Initial(account.id),
            date: account.creation_date,
            amount: account.initial_balance,
            balance_after: Decimal::ZERO,
        }];
        lines.extend(
            incoming
                .iter()
                .filter(|p| p.bank_account_id == account.id)
                .map(|p| to_line(p, LedgerTransactionId::Incoming(p.id))),
        );
        lines.extend(
            outgoing
                .iter()
                .filter(|p| p.bank_account_id == account.id)
                .map(|p| to_line(p, LedgerTransactionId::Outgoing(p.id))),
        );

        lines.sort_by_key(StatementLine::sort_key);

        let mut balance = Decimal::ZERO;
        for line in &mut lines {
            balance += line.signed_amount();
            line.balance_after = balance;
        }

        AccountStatement {
            account_id: account.id,
            currency: account.currency,
            lines,
        }
    }
}
