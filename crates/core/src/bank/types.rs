//! Bank accounts and their derived statements.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{BankAccountId, Currency, PaymentId};
use uuid::Uuid;

use super::error::BankError;

/// A bank or cash account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// The account ID.
    pub id: BankAccountId,
    /// Display name.
    pub name: String,
    /// Currency the account is kept in.
    pub currency: Currency,
    /// Opening balance in `currency`.
    #[serde(default)]
    pub initial_balance: Decimal,
    /// When the account was opened.
    pub creation_date: DateTime<Utc>,
}

/// Kind of a statement line. Also its tie-break priority on equal dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Opening balance.
    Initial = 0,
    /// Money in.
    Incoming = 1,
    /// Money out.
    Outgoing = 2,
}

/// Identifier of one statement line.
///
/// Renders as `initial-{account}`, `inc-{payment}` or `out-{payment}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LedgerTransactionId {
    /// Opening balance of an account.
    Initial(BankAccountId),
    /// Incoming payment.
    Incoming(PaymentId),
    /// Outgoing payment.
    Outgoing(PaymentId),
}

impl LedgerTransactionId {
    /// The kind of line this id names.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        match self {
            Self::Initial(_) => EntryKind::Initial,
            Self::Incoming(_) => EntryKind::Incoming,
            Self::Outgoing(_) => EntryKind::Outgoing,
        }
    }

    /// The payment behind this line, if any.
    #[must_use]
    pub const fn payment_id(&self) -> Option<PaymentId> {
        match self {
            Self::Initial(_) => None,
            Self::Incoming(id) | Self::Outgoing(id) => Some(*id),
        }
    }
}

impl fmt::Display for LedgerTransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial(id) => write!(f, "initial-{id}"),
            Self::Incoming(id) => write!(f, "inc-{id}"),
            Self::Outgoing(id) => write!(f, "out-{id}"),
        }
    }
}

impl FromStr for LedgerTransactionId {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BankError::InvalidTransactionId(s.to_string());
        let (prefix, rest) = s.split_once('-').ok_or_else(invalid)?;
        let uuid = Uuid::parse_str(rest).map_err(|_| invalid())?;
        match prefix {
            "initial" => Ok(Self::Initial(BankAccountId::from_uuid(uuid))),
            "inc" => Ok(Self::Incoming(PaymentId::from_uuid(uuid))),
            "out" => Ok(Self::Outgoing(PaymentId::from_uuid(uuid))),
            _ => Err(invalid()),
        }
    }
}

impl From<LedgerTransactionId> for String {
    fn from(id: LedgerTransactionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for LedgerTransactionId {
    type Error = BankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One line of an account statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Line identifier.
    pub id: LedgerTransactionId,
    /// Payment date, or the account's creation date for the opening line.
    pub date: DateTime<Utc>,
    /// Unsigned amount in the account currency.
    pub amount: Decimal,
    /// Balance right after this line.
    pub balance_after: Decimal,
}

impl StatementLine {
    /// Ordering key: `(date, kind, payment id)`.
    ///
    /// The opening line sorts at the earliest representable instant so it
    /// comes first whatever the payment dates.
    pub(crate) fn sort_key(&self) -> (DateTime<Utc>, EntryKind, Option<PaymentId>) {
        let date = match self.id {
            LedgerTransactionId::Initial(_) => DateTime::<Utc>::MIN_UTC,
            _ => self.date,
        };
        (date, self.id.kind(), self.id.payment_id())
    }

    /// Signed effect of the line on the balance.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.id.kind() {
            EntryKind::Initial | EntryKind::Incoming => self.amount,
            EntryKind::Outgoing => -self.amount,
        }
    }
}

/// Chronological statement of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatement {
    /// The account.
    pub account_id: BankAccountId,
    /// Account currency.
    pub currency: Currency,
    /// Lines in ledger order, opening line first.
    pub lines: Vec<StatementLine>,
}

impl AccountStatement {
    /// Balance after the chronologically last line.
    #[must_use]
    pub fn current_balance(&self) -> Decimal {
        self.lines.last().map_or(Decimal::ZERO, |l| l.balance_after)
    }
}

/// Running balances of every account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunningBalances {
    statements: BTreeMap<BankAccountId, AccountStatement>,
}

impl RunningBalances {
    pub(crate) fn insert(&mut self, statement: AccountStatement) {
        self.statements.insert(statement.account_id, statement);
    }

    /// Statement of one account.
    #[must_use]
    pub fn statement(&self, account_id: BankAccountId) -> Option<&AccountStatement> {
        self.statements.get(&account_id)
    }

    /// Balance right after a given line.
    #[must_use]
    pub fn balance_after(&self, account_id: BankAccountId, id: &LedgerTransactionId) -> Option<Decimal> {
        self.statement(account_id)?
            .lines
            .iter()
            .find(|line| &line.id == id)
            .map(|line| line.balance_after)
    }

    /// Current balance of an account, `None` if the account is unknown.
    #[must_use]
    pub fn current_balance(&self, account_id: BankAccountId) -> Option<Decimal> {
        self.statement(account_id).map(AccountStatement::current_balance)
    }

    /// Flattens to `account → transaction id → balance after`.
    #[must_use]
    pub fn to_balance_map(&self) -> BTreeMap<BankAccountId, BTreeMap<String, Decimal>> {
        self.statements
            .iter()
            .map(|(account_id, statement)| {
                let balances = statement
                    .lines
                    .iter()
                    .map(|line| (line.id.to_string(), line.balance_after))
                    .collect();
                (*account_id, balances)
            })
            .collect()
    }

    /// Iterates over statements in account id order.
    pub fn iter(&self) -> impl Iterator<Item = &AccountStatement> {
        self.statements.values()
    }
}
