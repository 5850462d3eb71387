use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use log::{debug, info};

use crate::{
    errors::CustomError,
    models::{
        asset::{normalize_address, validate_address, Asset},
        price_context::{DisplaySettings, PriceContext},
        wallet_state::{WalletState, WalletStateUpdate},
    },
    services::{collaborators::TokenRemover, units::parse_minimal_units},
};

/// Everything one render pass reads, detached from the store.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    pub assets: Vec<Asset>,
    pub context: PriceContext,
    pub settings: DisplaySettings,
}

/// Owns the upstream wallet state and hands out read-only snapshots.
pub struct WalletStateStore {
    state: RwLock<WalletState>,
}

impl WalletStateStore {
    pub fn new(state: WalletState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn with_currency(currency: &str) -> Self {
        Self::new(WalletState {
            current_currency: currency.to_string(),
            ..Default::default()
        })
    }

    /// Merge an update. Invalid input leaves the state untouched.
    ///
    /// Address keys are stored lowercased; two keys naming the same address
    /// are rejected.
    pub fn apply(&self, update: WalletStateUpdate) -> Result<(), CustomError> {
        if let Some(tokens) = &update.tokens {
            validate_tokens(tokens)?;
        }
        if let Some(balances) = &update.token_balances {
            for (address, amount) in balances {
                check_address(address)?;
                parse_minimal_units(amount)?;
            }
        }
        if let Some(rates) = &update.token_exchange_rates {
            for (address, rate) in rates {
                check_address(address)?;
                if !rate.is_finite() || *rate < 0.0 {
                    return Err(CustomError::ValidationError(format!(
                        "exchange rate for {} must be a non-negative number",
                        address
                    )));
                }
            }
        }
        if let Some(rate) = update.conversion_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(CustomError::ValidationError(
                    "conversion rate must be a non-negative number".to_string(),
                ));
            }
        }

        let token_balances = update.token_balances.map(normalize_keys).transpose()?;
        let token_exchange_rates = update.token_exchange_rates.map(normalize_keys).transpose()?;
        let token_logos = update.token_logos.map(normalize_keys).transpose()?;

        let mut state = self
            .state
            .write()
            .map_err(|_| CustomError::InternalServerError)?;

        if let Some(tokens) = update.tokens {
            let listed: Vec<Asset> = tokens
                .into_iter()
                .filter(|asset| !is_ignored(&state.ignored_tokens, asset))
                .collect();
            state.tokens = listed;
        }
        if let Some(rate) = update.conversion_rate {
            state.conversion_rate = rate;
        }
        if let Some(currency) = update.current_currency {
            state.current_currency = currency;
        }
        if let Some(balances) = token_balances {
            state.token_balances = balances;
        }
        if let Some(rates) = token_exchange_rates {
            state.token_exchange_rates = rates;
        }
        if let Some(logos) = token_logos {
            state.token_logos = logos;
        }
        if let Some(settings) = update.settings {
            state.settings = settings;
        }

        debug!("wallet state updated: {} tokens", state.tokens.len());
        Ok(())
    }

    /// Build the read-only inputs for one render.
    pub fn snapshot(&self) -> Result<RenderSnapshot, CustomError> {
        let state = self
            .state
            .read()
            .map_err(|_| CustomError::InternalServerError)?;

        let mut context = PriceContext::new(state.conversion_rate, &state.current_currency);
        for (address, rate) in &state.token_exchange_rates {
            context = context.with_exchange_rate(address, *rate);
        }
        for (address, amount) in &state.token_balances {
            // validated on the way in
            if let Ok(raw) = parse_minimal_units(amount) {
                context = context.with_balance(address, raw);
            }
        }
        for (address, logo) in &state.token_logos {
            context = context.with_logo(address, logo);
        }

        Ok(RenderSnapshot {
            assets: state.tokens.clone(),
            context,
            settings: state.settings.clone(),
        })
    }

    /// Look up a listed asset; `None` selects the native asset.
    pub fn find_asset(&self, address: Option<&str>) -> Result<Asset, CustomError> {
        let state = self
            .state
            .read()
            .map_err(|_| CustomError::InternalServerError)?;

        let wanted = address.map(normalize_address);
        state
            .tokens
            .iter()
            .find(|asset| match &wanted {
                Some(wanted) => asset.lookup_key().as_ref() == Some(wanted),
                None => asset.is_native_asset,
            })
            .cloned()
            .ok_or_else(|| CustomError::TokenNotFoundError(address.unwrap_or("native").to_string()))
    }

    pub fn ignored_tokens(&self) -> Vec<String> {
        self.state
            .read()
            .map(|state| state.ignored_tokens.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TokenRemover for WalletStateStore {
    async fn remove_and_ignore_token(&self, address: &str) -> Result<(), CustomError> {
        let key = normalize_address(address);
        let mut state = self
            .state
            .write()
            .map_err(|_| CustomError::InternalServerError)?;

        let position = state
            .tokens
            .iter()
            .position(|asset| asset.lookup_key().as_deref() == Some(key.as_str()))
            .ok_or_else(|| CustomError::TokenNotFoundError(address.to_string()))?;

        if state.tokens[position].is_native_asset {
            return Err(CustomError::NativeAssetNotRemovableError);
        }

        let removed = state.tokens.remove(position);
        if !state.ignored_tokens.contains(&key) {
            state.ignored_tokens.push(key.clone());
        }
        state.token_balances.retain(|a, _| normalize_address(a) != key);

        info!("token {} ({}) removed and ignored", removed.symbol, key);
        Ok(())
    }
}

fn check_address(address: &str) -> Result<(), CustomError> {
    if validate_address(address) {
        Ok(())
    } else {
        Err(CustomError::InvalidAddressError(address.to_string()))
    }
}

fn normalize_keys<V>(map: HashMap<String, V>) -> Result<HashMap<String, V>, CustomError> {
    let mut normalized = HashMap::with_capacity(map.len());
    for (address, value) in map {
        let key = normalize_address(&address);
        if normalized.insert(key, value).is_some() {
            return Err(CustomError::ValidationError(format!(
                "address {} is listed more than once",
                address
            )));
        }
    }
    Ok(normalized)
}

fn validate_tokens(tokens: &[Asset]) -> Result<(), CustomError> {
    let native_count = tokens.iter().filter(|asset| asset.is_native_asset).count();
    if native_count > 1 {
        return Err(CustomError::ValidationError(
            "at most one native asset may be listed".to_string(),
        ));
    }

    for asset in tokens {
        match (&asset.address, asset.is_native_asset) {
            (Some(address), false) => check_address(address)?,
            (None, false) => {
                return Err(CustomError::ValidationError(format!(
                    "token {} is missing an address",
                    asset.symbol
                )))
            }
            (Some(_), true) => {
                return Err(CustomError::ValidationError(
                    "the native asset has no contract address".to_string(),
                ))
            }
            (None, true) => {}
        }
    }
    Ok(())
}

fn is_ignored(ignored: &[String], asset: &Asset) -> bool {
    asset
        .lookup_key()
        .map(|key| ignored.contains(&key))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    fn seeded() -> WalletStateStore {
        let store = WalletStateStore::with_currency("usd");
        store
            .apply(WalletStateUpdate {
                tokens: Some(vec![Asset::native("ETH", "1"), Asset::token(DAI, "DAI", 18)]),
                conversion_rate: Some(2000.0),
                token_balances: Some(HashMap::from([(
                    DAI.to_string(),
                    "3000000000000000000".to_string(),
                )])),
                token_exchange_rates: Some(HashMap::from([(DAI.to_string(), 0.0005)])),
                ..Default::default()
            })
            .unwrap();
        store
    }

    #[test]
    fn snapshot_builds_case_insensitive_context() {
        let snapshot = seeded().snapshot().unwrap();
        assert_eq!(snapshot.assets.len(), 2);
        assert_eq!(snapshot.context.conversion_rate, 2000.0);
        assert_eq!(
            snapshot.context.balance(&DAI.to_lowercase()),
            Some(U256::from_dec_str("3000000000000000000").unwrap())
        );
        assert_eq!(snapshot.context.exchange_rate(DAI), Some(0.0005));
    }

    #[test]
    fn rejects_bad_balances_without_partial_writes() {
        let store = seeded();
        let err = store
            .apply(WalletStateUpdate {
                conversion_rate: Some(1.0),
                token_balances: Some(HashMap::from([(DAI.to_string(), "lots".to_string())])),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err, CustomError::InvalidAmountError("lots".to_string()));
        assert_eq!(store.snapshot().unwrap().context.conversion_rate, 2000.0);
    }

    #[test]
    fn stores_address_keys_lowercased() {
        let store = seeded();
        store
            .apply(WalletStateUpdate {
                token_exchange_rates: Some(HashMap::from([(DAI.to_string(), 0.001)])),
                ..Default::default()
            })
            .unwrap();

        let state = store.state.read().unwrap();
        assert!(state.token_balances.contains_key(&DAI.to_lowercase()));
        assert_eq!(state.token_exchange_rates.get(&DAI.to_lowercase()), Some(&0.001));
        assert!(!state.token_exchange_rates.contains_key(DAI));
    }

    #[test]
    fn rejects_keys_differing_only_in_case() {
        let store = seeded();
        let err = store
            .apply(WalletStateUpdate {
                token_balances: Some(HashMap::from([
                    (DAI.to_string(), "1".to_string()),
                    (DAI.to_lowercase(), "2".to_string()),
                ])),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, CustomError::ValidationError(_)));
        assert_eq!(
            store.snapshot().unwrap().context.balance(DAI),
            Some(U256::from_dec_str("3000000000000000000").unwrap())
        );
    }

    #[test]
    fn rejects_two_native_assets() {
        let store = WalletStateStore::with_currency("usd");
        let err = store
            .apply(WalletStateUpdate {
                tokens: Some(vec![Asset::native("ETH", "1"), Asset::native("ETH", "2")]),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CustomError::ValidationError(_)));
    }

    #[test]
    fn find_asset_by_address_or_native() {
        let store = seeded();
        assert_eq!(store.find_asset(None).unwrap().symbol, "ETH");
        assert_eq!(store.find_asset(Some(&DAI.to_lowercase())).unwrap().symbol, "DAI");
        assert!(matches!(
            store.find_asset(Some("0x0000000000000000000000000000000000000001")),
            Err(CustomError::TokenNotFoundError(_))
        ));
    }

    #[actix_web::test]
    async fn removed_tokens_stay_ignored() {
        let store = seeded();
        store.remove_and_ignore_token(DAI).await.unwrap();

        assert_eq!(store.snapshot().unwrap().assets.len(), 1);
        assert_eq!(store.ignored_tokens(), vec![DAI.to_lowercase()]);

        // controllers re-reporting the token do not bring it back
        store
            .apply(WalletStateUpdate {
                tokens: Some(vec![Asset::native("ETH", "1"), Asset::token(DAI, "DAI", 18)]),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(store.snapshot().unwrap().assets.len(), 1);
    }

    #[actix_web::test]
    async fn removing_unknown_token_fails() {
        let store = seeded();
        let err = store
            .remove_and_ignore_token("0x0000000000000000000000000000000000000001")
            .await
            .unwrap_err();
        assert!(matches!(err, CustomError::TokenNotFoundError(_)));
    }
}
