use serde::{Deserialize, Serialize};

/// A fungible asset as supplied by the token registry for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// `None` for the chain's native asset.
    #[serde(default)]
    pub address: Option<String>,
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub decimals: u8,
    /// Human-readable balance, already scaled by `decimals`.
    #[serde(default)]
    pub balance: Option<String>,
    /// Pre-rendered fiat value. Used verbatim when present.
    #[serde(default)]
    pub balance_fiat: Option<String>,
    #[serde(default)]
    pub is_native_asset: bool,
    #[serde(default)]
    pub has_balance_error: bool,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Asset {
    pub fn native(symbol: &str, balance: &str) -> Self {
        Self {
            address: None,
            symbol: symbol.to_string(),
            name: None,
            decimals: 18,
            balance: Some(balance.to_string()),
            balance_fiat: None,
            is_native_asset: true,
            has_balance_error: false,
            logo: None,
        }
    }

    pub fn token(address: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            address: Some(address.to_string()),
            symbol: symbol.to_string(),
            name: None,
            decimals,
            balance: None,
            balance_fiat: None,
            is_native_asset: false,
            has_balance_error: false,
            logo: None,
        }
    }

    pub fn with_balance(mut self, balance: &str) -> Self {
        self.balance = Some(balance.to_string());
        self
    }

    pub fn with_balance_fiat(mut self, balance_fiat: &str) -> Self {
        self.balance_fiat = Some(balance_fiat.to_string());
        self
    }

    /// Lowercased address used for every mapping lookup.
    pub fn lookup_key(&self) -> Option<String> {
        self.address.as_deref().map(normalize_address)
    }

    /// Stable key for a rendered row; the native asset has no address.
    pub fn row_key(&self) -> String {
        self.lookup_key().unwrap_or_else(|| "0x".to_string())
    }

    pub fn is_removable(&self) -> bool {
        !self.is_native_asset
    }

    /// Balance string the registry supplied, ignoring empty strings.
    pub fn supplied_balance(&self) -> Option<&str> {
        self.balance.as_deref().filter(|b| !b.is_empty())
    }

    pub fn supplied_balance_fiat(&self) -> Option<&str> {
        self.balance_fiat.as_deref().filter(|b| !b.is_empty())
    }
}

pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Accepts `0x` followed by 40 hex digits.
pub fn validate_address(address: &str) -> bool {
    let trimmed = address.trim();
    trimmed.len() == 42
        && trimmed.starts_with("0x")
        && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit())
}
