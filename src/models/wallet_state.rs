use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{asset::Asset, price_context::DisplaySettings};

/// Upstream wallet state as the controllers last reported it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletState {
    pub tokens: Vec<Asset>,
    pub ignored_tokens: Vec<String>,
    pub conversion_rate: f64,
    pub current_currency: String,
    /// address => balance in minimal units, as a decimal string
    pub token_balances: HashMap<String, String>,
    /// address => price of one token in native units
    pub token_exchange_rates: HashMap<String, f64>,
    pub token_logos: HashMap<String, String>,
    pub settings: DisplaySettings,
}

/// Partial update pushed by upstream controllers. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletStateUpdate {
    pub tokens: Option<Vec<Asset>>,
    pub conversion_rate: Option<f64>,
    pub current_currency: Option<String>,
    pub token_balances: Option<HashMap<String, String>>,
    pub token_exchange_rates: Option<HashMap<String, f64>>,
    pub token_logos: Option<HashMap<String, String>>,
    pub settings: Option<DisplaySettings>,
}
