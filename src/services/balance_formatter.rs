use log::debug;

use crate::{
    messages,
    models::{
        asset::Asset,
        display::BalanceDisplay,
        price_context::{PriceContext, PrimaryCurrency},
    },
    services::units::{balance_to_fiat, render_from_token_minimal_unit, DECIMALS_TO_SHOW},
};

/// Balance and fiat value resolved for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBalance {
    pub balance: String,
    pub balance_fiat: Option<String>,
}

pub struct BalanceFormatter;

impl BalanceFormatter {
    /// Resolve the display amount and fiat value for `asset`.
    ///
    /// Values the registry supplied win over anything derived from the context.
    pub fn resolve(asset: &Asset, ctx: &PriceContext) -> ResolvedBalance {
        let address = asset.address.as_deref();

        let balance = match asset.supplied_balance() {
            Some(balance) => balance.to_string(),
            None => address
                .and_then(|a| ctx.balance(a))
                .map(|raw| render_from_token_minimal_unit(raw, asset.decimals, DECIMALS_TO_SHOW))
                .unwrap_or_else(|| "0".to_string()),
        };

        let balance_fiat = match asset.supplied_balance_fiat() {
            Some(fiat) => Some(fiat.to_string()),
            None => {
                let exchange_rate = address.and_then(|a| ctx.exchange_rate(a));
                balance_to_fiat(
                    &balance,
                    ctx.conversion_rate,
                    exchange_rate,
                    &ctx.current_currency,
                )
            }
        };

        ResolvedBalance {
            balance,
            balance_fiat,
        }
    }

    pub fn format(asset: &Asset, ctx: &PriceContext, primary: PrimaryCurrency) -> BalanceDisplay {
        if asset.has_balance_error {
            debug!("balance for {} failed to load upstream", asset.symbol);
            return BalanceDisplay {
                primary: asset.symbol.clone(),
                secondary: Some(messages::UNABLE_TO_LOAD.to_string()),
                is_error: true,
            };
        }

        let resolved = Self::resolve(asset, ctx);
        Self::arrange(asset, resolved, primary)
    }

    fn arrange(asset: &Asset, resolved: ResolvedBalance, primary: PrimaryCurrency) -> BalanceDisplay {
        let native_text = format!("{} {}", resolved.balance, asset.symbol);

        let (primary, secondary) = match (primary, resolved.balance_fiat) {
            (PrimaryCurrency::Native, fiat) => (native_text, fiat),
            (PrimaryCurrency::Fiat, Some(fiat)) => (fiat, Some(native_text)),
            (PrimaryCurrency::Fiat, None) => (native_text, None),
        };

        BalanceDisplay {
            primary,
            secondary,
            is_error: false,
        }
    }
}
