//! Payment records and the orders they settle.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{BankAccountId, Currency, OrderId, PaymentId};

use crate::inventory::{PurchaseOrder, SellOrder};

/// Sub-ledger of an order that a payment settles.
///
/// Serialized as a plain label. Unknown labels are manual categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentCategory {
    /// The goods on the order.
    Products,
    /// All fees on the order.
    Fees,
    /// Transportation fee only.
    TransportationFees,
    /// Customs fee only.
    CustomFees,
    /// Additional fee only.
    AdditionalFees,
    /// Unlinked payment with a free-form label.
    Manual(String),
}

impl PaymentCategory {
    /// The serialized label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Products => "products",
            Self::Fees => "fees",
            Self::TransportationFees => "transportationFees",
            Self::CustomFees => "customFees",
            Self::AdditionalFees => "additionalFees",
            Self::Manual(label) => label,
        }
    }

    /// Returns true for manual categories.
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }

    /// Returns true for `fees` and the per-fee labels.
    #[must_use]
    pub const fn is_fee(&self) -> bool {
        matches!(
            self,
            Self::Fees | Self::TransportationFees | Self::CustomFees | Self::AdditionalFees
        )
    }

    /// Returns true for the per-fee labels that share the `fees` ledger.
    #[must_use]
    pub const fn is_legacy_fee(&self) -> bool {
        self.is_fee() && !matches!(self, Self::Fees)
    }

    /// Returns true if payments under `other` count against this category.
    ///
    /// `fees` absorbs every per-fee label; other categories only match
    /// themselves.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        match self {
            Self::Fees => other.is_fee(),
            _ => self == other,
        }
    }
}

impl From<String> for PaymentCategory {
    fn from(label: String) -> Self {
        match label.trim() {
            "products" => Self::Products,
            "fees" => Self::Fees,
            "transportationFees" | "transportation_fees" => Self::TransportationFees,
            "customFees" | "custom_fees" => Self::CustomFees,
            "additionalFees" | "additional_fees" => Self::AdditionalFees,
            _ => Self::Manual(label),
        }
    }
}

impl From<PaymentCategory> for String {
    fn from(category: PaymentCategory) -> Self {
        match category {
            PaymentCategory::Manual(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A payment in or out of a bank account.
///
/// Whether it is incoming or outgoing depends on the collection it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// The payment ID.
    pub id: PaymentId,
    /// Order settled by this payment, `None` for unlinked payments.
    #[serde(default)]
    pub order_id: Option<OrderId>,
    /// Order sub-ledger settled by this payment.
    pub category: PaymentCategory,
    /// Account the money moves through.
    pub bank_account_id: BankAccountId,
    /// When the payment was made.
    pub date: DateTime<Utc>,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Pivot units per unit of `currency`, pinned at creation.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Payment method, e.g. "cash" or "transfer".
    #[serde(default)]
    pub method: String,
    /// Free-form note. Required on most manual payments.
    #[serde(default)]
    pub description: Option<String>,
}

impl Payment {
    /// Returns true if the payment is not tracked against any order balance.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.order_id.is_none() || self.category.is_manual()
    }

    /// Returns true if the description is present and not blank.
    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// An order that payments can be applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayableOrder<'a> {
    /// Paid out to a supplier.
    Purchase(&'a PurchaseOrder),
    /// Paid in by a customer.
    Sell(&'a SellOrder),
}

impl PayableOrder<'_> {
    /// The order ID.
    #[must_use]
    pub fn id(&self) -> OrderId {
        match self {
            Self::Purchase(o) => o.id,
            Self::Sell(o) => o.id,
        }
    }

    /// Categories that carry a balance on this order.
    #[must_use]
    pub fn categories(&self) -> Vec<PaymentCategory> {
        match self {
            Self::Purchase(o) if o.fees.iter().next().is_some() => {
                vec![PaymentCategory::Products, PaymentCategory::Fees]
            }
            _ => vec![PaymentCategory::Products],
        }
    }
}

impl<'a> From<&'a PurchaseOrder> for PayableOrder<'a> {
    fn from(order: &'a PurchaseOrder) -> Self {
        Self::Purchase(order)
    }
}

impl<'a> From<&'a SellOrder> for PayableOrder<'a> {
    fn from(order: &'a SellOrder) -> Self {
        Self::Sell(order)
    }
}
