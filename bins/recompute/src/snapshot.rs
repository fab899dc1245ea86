//! Record snapshot input and the derived report.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use stockbook_core::bank::{BankAccount, BankLedger, RunningBalances};
use stockbook_core::currency::{RateTable, round_for_display};
use stockbook_core::inventory::{InventoryValuation, ProductCatalog, PurchaseOrder, SellOrder, inventory_valuation};
use stockbook_core::payments::{OpenBalance, PayableOrder, Payment, PaymentReconciler};
use stockbook_shared::AccountingConfig;
use tracing::info;

/// Every record collection the core reads, as persisted by the application.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    /// Current rate table.
    pub rates: RateTable,
    /// Products with their current stock and cost.
    #[serde(default)]
    pub products: ProductCatalog,
    /// Purchase orders.
    #[serde(default)]
    pub purchase_orders: Vec<PurchaseOrder>,
    /// Sell orders.
    #[serde(default)]
    pub sell_orders: Vec<SellOrder>,
    /// Bank and cash accounts.
    #[serde(default)]
    pub bank_accounts: Vec<BankAccount>,
    /// Payments received.
    #[serde(default)]
    pub incoming_payments: Vec<Payment>,
    /// Payments made.
    #[serde(default)]
    pub outgoing_payments: Vec<Payment>,
}

/// Values derived from a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Statement with running balances per bank account.
    pub running_balances: RunningBalances,
    /// Order categories still waiting for payment.
    pub open_balances: Vec<OpenBalance>,
    /// Stock valuation at average landed cost.
    pub valuation: InventoryValuation,
}

/// Recomputes every derived value from scratch.
///
/// Fails if the snapshot's rates are quoted against a pivot other than the
/// configured one, since every pivot amount in the report would be off.
pub fn build_report(snapshot: &Snapshot, config: &AccountingConfig) -> anyhow::Result<Report> {
    if snapshot.rates.pivot() != config.pivot_currency {
        bail!(
            "snapshot rates are quoted in {} but the configured pivot currency is {}",
            snapshot.rates.pivot(),
            config.pivot_currency
        );
    }

    let running_balances = BankLedger::compute_running_balances(
        &snapshot.bank_accounts,
        &snapshot.incoming_payments,
        &snapshot.outgoing_payments,
        &snapshot.rates,
    );

    // Suppliers are paid from outgoing payments, customers pay in.
    let reconciler = PaymentReconciler::new(&snapshot.rates, config);
    let purchases: Vec<PayableOrder<'_>> = snapshot.purchase_orders.iter().map(PayableOrder::from).collect();
    let sells: Vec<PayableOrder<'_>> = snapshot.sell_orders.iter().map(PayableOrder::from).collect();
    let mut open_balances = reconciler.open_balances(&purchases, &snapshot.outgoing_payments);
    open_balances.extend(reconciler.open_balances(&sells, &snapshot.incoming_payments));

    let places = config.display_decimal_places;
    for balance in &mut open_balances {
        balance.total = round_for_display(balance.total, places);
        balance.paid = round_for_display(balance.paid, places);
        balance.remaining = round_for_display(balance.remaining, places);
    }

    let mut valuation = inventory_valuation(&snapshot.products);
    valuation.total_value = round_for_display(valuation.total_value, places);

    info!(
        accounts = snapshot.bank_accounts.len(),
        open = open_balances.len(),
        products = valuation.lines.len(),
        "report built"
    );

    Ok(Report {
        running_balances,
        open_balances,
        valuation,
    })
}
