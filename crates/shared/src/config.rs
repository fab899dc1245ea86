//! Application configuration management.
//!
//! Settings that used to be ambient (pivot currency, payment tolerance, VAT and
//! markup defaults) live in [`AccountingConfig`] and are passed explicitly to
//! every engine call.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Accounting policy configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
    /// Snapshot input configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

/// Accounting policy shared by all engines.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// Reference currency every rate is quoted against.
    #[serde(default = "default_pivot_currency")]
    pub pivot_currency: Currency,
    /// Tolerance absorbing decimal noise when comparing payments to balances.
    #[serde(default = "default_payment_epsilon")]
    pub payment_epsilon: Decimal,
    /// Decimal places kept for average landed cost.
    #[serde(default = "default_cost_decimal_places")]
    pub cost_decimal_places: u32,
    /// Decimal places used when rounding for display.
    #[serde(default = "default_display_decimal_places")]
    pub display_decimal_places: u32,
    /// VAT applied to new sell orders, in percent.
    #[serde(default = "default_vat_percent")]
    pub default_vat_percent: Decimal,
    /// Markup over average landed cost suggested for new sell lines, in percent.
    #[serde(default)]
    pub default_markup_percent: Decimal,
    /// Manual payment category that does not require a description.
    #[serde(default = "default_initial_capital_category")]
    pub initial_capital_category: String,
}

fn default_pivot_currency() -> Currency {
    Currency::Azn
}

fn default_payment_epsilon() -> Decimal {
    Decimal::new(1, 3)
}

fn default_cost_decimal_places() -> u32 {
    4
}

fn default_display_decimal_places() -> u32 {
    2
}

fn default_vat_percent() -> Decimal {
    Decimal::from(18)
}

fn default_initial_capital_category() -> String {
    "initial_capital".to_string()
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            pivot_currency: default_pivot_currency(),
            payment_epsilon: default_payment_epsilon(),
            cost_decimal_places: default_cost_decimal_places(),
            display_decimal_places: default_display_decimal_places(),
            default_vat_percent: default_vat_percent(),
            default_markup_percent: Decimal::ZERO,
            initial_capital_category: default_initial_capital_category(),
        }
    }
}

/// Snapshot input configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the JSON snapshot of record collections.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STOCKBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_accounting_defaults() {
        let config = AccountingConfig::default();
        assert_eq!(config.pivot_currency, Currency::Azn);
        assert_eq!(config.payment_epsilon, dec!(0.001));
        assert_eq!(config.cost_decimal_places, 4);
        assert_eq!(config.default_vat_percent, dec!(18));
        assert_eq!(config.initial_capital_category, "initial_capital");
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "STOCKBOOK__ACCOUNTING__PAYMENT_EPSILON",
                "STOCKBOOK__SNAPSHOT__PATH",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.accounting.payment_epsilon, dec!(0.001));
                assert_eq!(config.snapshot.path, "snapshot.json");
            },
        );
    }

    #[test]
    fn test_load_reads_environment_overrides() {
        temp_env::with_vars(
            [
                ("STOCKBOOK__ACCOUNTING__PAYMENT_EPSILON", Some("0.01")),
                ("STOCKBOOK__SNAPSHOT__PATH", Some("/tmp/records.json")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.accounting.payment_epsilon, dec!(0.01));
                assert_eq!(config.snapshot.path, "/tmp/records.json");
            },
        );
    }
}
