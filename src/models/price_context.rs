use std::collections::HashMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use super::asset::normalize_address;

/// Which unit a balance line leads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryCurrency {
    #[default]
    Native,
    Fiat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub primary_currency: PrimaryCurrency,
    pub hide_zero_balance_tokens: bool,
    pub chain_id: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            primary_currency: PrimaryCurrency::Native,
            hide_zero_balance_tokens: false,
            chain_id: 1,
        }
    }
}

/// Read-only market and balance data for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceContext {
    pub conversion_rate: f64,
    pub current_currency: String,
    exchange_rates_by_address: HashMap<String, f64>,
    balances_by_address: HashMap<String, U256>,
    logos_by_address: HashMap<String, String>,
}

impl PriceContext {
    pub fn new(conversion_rate: f64, current_currency: &str) -> Self {
        Self {
            conversion_rate,
            current_currency: current_currency.to_string(),
            ..Default::default()
        }
    }

    pub fn with_exchange_rate(mut self, address: &str, rate: f64) -> Self {
        self.exchange_rates_by_address
            .insert(normalize_address(address), rate);
        self
    }

    pub fn with_balance(mut self, address: &str, minimal_units: U256) -> Self {
        self.balances_by_address
            .insert(normalize_address(address), minimal_units);
        self
    }

    pub fn with_logo(mut self, address: &str, logo: &str) -> Self {
        self.logos_by_address
            .insert(normalize_address(address), logo.to_string());
        self
    }

    /// `None` means the rate is unknown, which is not the same as zero.
    pub fn exchange_rate(&self, address: &str) -> Option<f64> {
        self.exchange_rates_by_address
            .get(&normalize_address(address))
            .copied()
    }

    /// Raw on-chain balance in minimal units.
    pub fn balance(&self, address: &str) -> Option<U256> {
        self.balances_by_address
            .get(&normalize_address(address))
            .copied()
    }

    pub fn logo(&self, address: &str) -> Option<&str> {
        self.logos_by_address
            .get(&normalize_address(address))
            .map(String::as_str)
    }
}
