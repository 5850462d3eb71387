pub const UNABLE_TO_LOAD: &str = "Unable to load balance";
pub const NO_TOKENS: &str = "You don't have any tokens!";
pub const READY_TO_EXPLORE: &str = "Ready to start exploring blockchain applications?";
pub const BUY_NATIVE: &str = "Buy ETH";

pub const REMOVE_TOKEN_TITLE: &str = "Do you want to hide this token?";
pub const REMOVE: &str = "Hide";
pub const CANCEL: &str = "Cancel";

pub const TOKEN_REMOVED_TITLE: &str = "Token hidden";
pub const TOKEN_REMOVED_DESC: &str =
    "If you change your mind, you can add it back by tapping on \"Add Tokens\"";
pub const TOKEN_REMOVAL_FAILED_TITLE: &str = "Could not hide token";

pub mod analytics {
    pub const WALLET_BUY_ETH: &str = "Wallet: Buy ETH";
    pub const ONRAMP_OPENED: &str = "On-ramp Opened";
    pub const WALLET_ADD_TOKENS: &str = "Wallet: Add Tokens";
    pub const BUTTON_LOCATION_HOME: &str = "Home Screen";
}
