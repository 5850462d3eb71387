use log::debug;

use crate::{
    messages,
    models::{
        asset::Asset,
        display::{AssetIcon, AssetListView, BuyPrompt, DisplayLine},
        price_context::{DisplaySettings, PriceContext},
    },
    services::{
        balance_formatter::BalanceFormatter, collaborators::BuyAvailability,
    },
};

/// Turns the asset collection and its price context into display lines.
///
/// Pure: the same inputs always give the same view.
pub struct AssetListPresenter;

impl AssetListPresenter {
    pub fn build_view(
        assets: &[Asset],
        ctx: &PriceContext,
        settings: &DisplaySettings,
        buy: &dyn BuyAvailability,
    ) -> AssetListView {
        if assets.is_empty() {
            return AssetListView {
                lines: Vec::new(),
                show_empty_state: true,
                empty_message: Some(messages::NO_TOKENS.to_string()),
                buy_prompt: None,
                show_add_token_footer: false,
            };
        }

        let lines: Vec<DisplayLine> = Self::visible_assets(assets, ctx, settings.hide_zero_balance_tokens)
            .map(|asset| Self::build_line(asset, ctx, settings))
            .collect();

        debug!(
            "built {} of {} asset lines (hide zero balances: {})",
            lines.len(),
            assets.len(),
            settings.hide_zero_balance_tokens
        );

        AssetListView {
            lines,
            show_empty_state: false,
            empty_message: None,
            buy_prompt: Self::buy_prompt(assets, ctx, settings.chain_id, buy),
            show_add_token_footer: true,
        }
    }

    /// Assets in input order, with zero balances dropped when asked.
    /// The native asset is always kept.
    pub fn visible_assets<'a>(
        assets: &'a [Asset],
        ctx: &'a PriceContext,
        filter_zero_balances: bool,
    ) -> impl Iterator<Item = &'a Asset> + 'a {
        assets.iter().filter(move |asset| {
            !filter_zero_balances || asset.is_native_asset || has_nonzero_onchain_balance(asset, ctx)
        })
    }

    fn build_line(asset: &Asset, ctx: &PriceContext, settings: &DisplaySettings) -> DisplayLine {
        let display = BalanceFormatter::format(asset, ctx, settings.primary_currency);
        let resolved = BalanceFormatter::resolve(asset, ctx);

        let logo = asset
            .logo
            .clone()
            .or_else(|| asset.address.as_deref().and_then(|a| ctx.logo(a)).map(str::to_string));

        let icon = if asset.is_native_asset {
            AssetIcon::NetworkMainAsset
        } else {
            AssetIcon::Token {
                address: asset.address.clone(),
                logo: logo.clone(),
            }
        };

        let resolved_asset = Asset {
            balance: Some(resolved.balance),
            balance_fiat: resolved.balance_fiat,
            logo,
            ..asset.clone()
        };

        DisplayLine {
            key: asset.row_key(),
            primary_text: display.primary,
            secondary_text: display.secondary,
            secondary_is_error: display.is_error,
            icon,
            is_actionable: asset.is_removable(),
            asset: resolved_asset,
        }
    }

    /// `None` when the chain does not offer buying.
    fn buy_prompt(
        assets: &[Asset],
        ctx: &PriceContext,
        chain_id: u64,
        buy: &dyn BuyAvailability,
    ) -> Option<BuyPrompt> {
        if !buy.allowed_to_buy(chain_id) {
            return None;
        }

        let has_native_balance = assets
            .iter()
            .find(|asset| asset.is_native_asset)
            .map(|native| native.balance.as_deref() != Some("0"))
            .unwrap_or(false);

        let has_token_balance = assets
            .iter()
            .filter(|asset| !asset.is_native_asset)
            .any(|asset| has_nonzero_onchain_balance(asset, ctx));

        let show_ready_to_explore = !has_native_balance && !has_token_balance;

        Some(BuyPrompt {
            show_ready_to_explore,
            message: show_ready_to_explore.then(|| messages::READY_TO_EXPLORE.to_string()),
            button_label: messages::BUY_NATIVE.to_string(),
        })
    }
}

/// Known, non-zero on-chain balance. A balance the registry attached to the
/// asset does not count.
fn has_nonzero_onchain_balance(asset: &Asset, ctx: &PriceContext) -> bool {
    asset
        .address
        .as_deref()
        .and_then(|address| ctx.balance(address))
        .map(|raw| !raw.is_zero())
        .unwrap_or(false)
}
