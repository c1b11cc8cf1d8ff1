//! # Shop Settings
//!
//! Operator-editable configuration persisted under its own key.
//! Read-mostly; the checkout stamps `cashier_id` onto every order.

use serde::{Deserialize, Serialize};

/// Shop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Shop name (displayed on receipts).
    pub shop_name: String,

    /// Shop address (for receipts).
    pub shop_address: String,

    /// Cashier stamped onto orders rung at this terminal.
    #[serde(default = "default_cashier_id")]
    pub cashier_id: String,

    /// Currency code (ISO 4217). Display concern only - amounts are raw
    /// minor units everywhere in the core.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

fn default_cashier_id() -> String {
    "cashier_01".to_string()
}

fn default_currency_code() -> String {
    "BDT".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            shop_name: "GrocerEase".to_string(),
            shop_address: "123 Fresh St, Farmville".to_string(),
            cashier_id: default_cashier_id(),
            currency_code: default_currency_code(),
        }
    }
}
