use serde::Serialize;

use super::asset::Asset;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetIcon {
    NetworkMainAsset,
    Token {
        address: Option<String>,
        logo: Option<String>,
    },
}

/// Primary and secondary strings for one balance row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceDisplay {
    pub primary: String,
    pub secondary: Option<String>,
    /// Set when `secondary` carries the load-failure message.
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayLine {
    pub key: String,
    pub primary_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    pub secondary_is_error: bool,
    pub icon: AssetIcon,
    /// Long-press opens the remove confirmation.
    pub is_actionable: bool,
    /// The asset with resolved balance, fiat value and logo.
    pub asset: Asset,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyPrompt {
    pub show_ready_to_explore: bool,
    pub message: Option<String>,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetListView {
    pub lines: Vec<DisplayLine>,
    pub show_empty_state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_prompt: Option<BuyPrompt>,
    pub show_add_token_footer: bool,
}

impl AssetListView {
    pub fn show_buy_prompt(&self) -> bool {
        self.buy_prompt
            .as_ref()
            .map(|prompt| prompt.show_ready_to_explore)
            .unwrap_or(false)
    }
}
